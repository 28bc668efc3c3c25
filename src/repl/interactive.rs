//! Interactive REPL implementation

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::client::ExecutionClient;
use crate::engine::{execute_command, ExecutionContext};
use crate::error::{ImgshellError, Result};
use crate::output::format_output;
use crate::parser::parse_command;
use crate::workspace::Workspace;

/// Run an interactive session until the user exits
pub fn run_repl<C: ExecutionClient>(workspace: &mut Workspace<C>, exec_ctx: &ExecutionContext) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| ImgshellError::ExecutionError(e.to_string()))?;

    println!("imgshell v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
    println!("Base image: {} ({} output)", workspace.image(), workspace.mode());
    println!("Type 'help' for commands, 'exit' to quit\n");

    loop {
        let prompt = format!("imgshell [{}]> ", workspace.active_image());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line.to_lowercase().as_str() {
                    "exit" | "quit" | "q" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" | "?" => {
                        print_help();
                        continue;
                    }
                    "clear" | "cls" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(line);

                let cmd = match parse_command(line) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        eprintln!("{}\n", e);
                        continue;
                    }
                };

                match execute_command(&cmd, workspace, exec_ctx) {
                    Ok(result) => {
                        let output = format_output(&result, &exec_ctx.output_format);
                        if !output.is_empty() {
                            println!("{}\n", output);
                        }
                    }
                    Err(e) => eprintln!("Error: {}\n", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
imgshell Commands
=================

Any line that does not start with ':' runs in a fresh container from the
current image. Nothing is kept unless you commit it.

SESSION:
  <command>                       - Run a command without committing
  :eval <command>                 - Same as a plain line
  :run <command>                  - Run a command and commit it as a layer
  :commit                         - Commit the last command you ran
  :back [n]                       - Undo the last n committed steps (default 1)
  :image <ref>                    - Start again from a different base image

OUTPUT:
  :print                          - Show the build file
  :write <path>                   - Write the build file to disk
  :history                        - List every step, including undone ones

REPL Commands:
  help, ?                         - Show this help
  clear, cls                      - Clear screen
  exit, quit, q                   - Exit REPL
"#
    );
}
