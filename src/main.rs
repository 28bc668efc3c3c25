//! imgshell CLI - build container images one command at a time

use clap::Parser;
use imgshell::cli::{Args, Backend, SubCommand};
use imgshell::{DockerClient, ExecutionClient, ExecutionContext, MockClient, OutputFormat, ScriptRunner, Workspace};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "imgshell=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> imgshell::Result<()> {
    let client: Box<dyn ExecutionClient> = match args.backend {
        Backend::Docker => Box::new(DockerClient::with_binary(&args.docker).with_shell(args.shell.as_str())),
        Backend::Mock => Box::new(MockClient::new()),
    };
    let mut workspace = Workspace::new(client, args.mode, args.image.as_str());

    let output_format = if args.json { OutputFormat::Json } else { OutputFormat::Human };

    match args.command {
        SubCommand::Repl => {
            let ctx = ExecutionContext {
                interactive: true,
                output_format,
                verbose: args.verbose,
            };
            imgshell::repl::run_repl(&mut workspace, &ctx)
        }

        SubCommand::Replay { file, output, keep_going } => {
            let ctx = ExecutionContext {
                interactive: false,
                output_format,
                verbose: args.verbose,
            };

            let mut runner = ScriptRunner::new(workspace, ctx).keep_going(keep_going);
            let result = runner.run_file(&file)?;

            if !result.success {
                if let Some(err) = result.error {
                    return Err(imgshell::ImgshellError::ScriptFailed(err));
                }
            }

            let workspace = runner.into_workspace();
            match output {
                Some(path) => workspace.write(&path)?,
                None => println!("{}", workspace.sprint().join("\n")),
            }

            if args.verbose {
                eprintln!(
                    "--- Replay completed: {} statements executed ---",
                    result.statements_executed
                );
            }

            Ok(())
        }
    }
}
