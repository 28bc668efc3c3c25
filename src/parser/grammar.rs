//! Pest grammar parser for session commands

use std::path::PathBuf;

use pest::Parser;
use pest_derive::Parser;

use crate::error::{ImgshellError, Result};
use crate::parser::ast::*;

#[derive(Parser)]
#[grammar = "../grammar/session.pest"]
pub struct SessionParser;

/// Parse one line into a session command
pub fn parse_command(input: &str) -> Result<Command> {
    let pairs = SessionParser::parse(Rule::command, input)
        .map_err(|e| ImgshellError::ParseError(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| ImgshellError::ParseError("Empty input".to_string()))?;

    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| ImgshellError::ParseError("Expected command".to_string()))?;

    match inner.as_rule() {
        Rule::run_cmd => Ok(Command::Run(parse_argument(inner)?)),
        Rule::eval_cmd | Rule::shell_cmd => Ok(Command::Eval(parse_argument(inner)?)),
        Rule::commit_cmd => Ok(Command::Commit),
        Rule::back_cmd => parse_back(inner),
        Rule::image_cmd => Ok(Command::Image(parse_argument(inner)?)),
        Rule::write_cmd => Ok(Command::Write(PathBuf::from(parse_argument(inner)?))),
        Rule::print_cmd => Ok(Command::Print),
        Rule::history_cmd => Ok(Command::History),
        _ => Err(ImgshellError::ParseError(format!(
            "Unexpected rule: {:?}",
            inner.as_rule()
        ))),
    }
}

/// Parse a session file.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_script(input: &str) -> Result<Script> {
    let mut statements = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = parse_command(trimmed).map_err(|e| {
            ImgshellError::ParseError(format!("line {}: {}", index + 1, e))
        })?;
        statements.push((index + 1, command));
    }

    Ok(Script { statements })
}

fn parse_argument(pair: pest::iterators::Pair<Rule>) -> Result<String> {
    let text = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::rest)
        .map(|p| p.as_str().trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ImgshellError::ParseError("Missing argument".to_string()));
    }
    Ok(text)
}

fn parse_back(pair: pest::iterators::Pair<Rule>) -> Result<Command> {
    match pair.into_inner().find(|p| p.as_rule() == Rule::number) {
        Some(number) => number
            .as_str()
            .parse::<usize>()
            .map(Command::Back)
            .map_err(|e| ImgshellError::ParseError(format!("Invalid step count: {}", e))),
        None => Ok(Command::Back(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_eval() {
        let cmd = parse_command("apt-get update").unwrap();
        assert_eq!(cmd, Command::Eval("apt-get update".to_string()));
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let cmd = parse_command("   ls -la  ").unwrap();
        assert_eq!(cmd, Command::Eval("ls -la".to_string()));
    }

    #[test]
    fn test_run() {
        let cmd = parse_command(":run apt-get install -y curl").unwrap();
        assert_eq!(cmd, Command::Run("apt-get install -y curl".to_string()));
    }

    #[test]
    fn test_eval_keyword() {
        let cmd = parse_command(":eval echo :run").unwrap();
        assert_eq!(cmd, Command::Eval("echo :run".to_string()));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(parse_command(":COMMIT").unwrap(), Command::Commit);
        assert_eq!(parse_command(":Print").unwrap(), Command::Print);
    }

    #[test]
    fn test_back() {
        assert_eq!(parse_command(":back").unwrap(), Command::Back(1));
        assert_eq!(parse_command(":back 3").unwrap(), Command::Back(3));
        assert_eq!(parse_command(":back 2 ").unwrap(), Command::Back(2));
        assert!(parse_command(":back two").is_err());
    }

    #[test]
    fn test_image_and_write() {
        assert_eq!(
            parse_command(":image fedora:39").unwrap(),
            Command::Image("fedora:39".to_string())
        );
        assert_eq!(
            parse_command(":write out/Dockerfile").unwrap(),
            Command::Write(PathBuf::from("out/Dockerfile"))
        );
    }

    #[test]
    fn test_missing_argument() {
        assert!(parse_command(":run").is_err());
        assert!(parse_command(":run   ").is_err());
        assert!(parse_command(":image").is_err());
    }

    #[test]
    fn test_unknown_session_command() {
        assert!(parse_command(":undo").is_err());
        assert!(parse_command(":commitx").is_err());
    }

    #[test]
    fn test_script() {
        let script = parse_script("# setup\n\n:run apt-get update\nls /\n:back\n").unwrap();
        assert_eq!(script.statements.len(), 3);
        assert_eq!(script.statements[0], (3, Command::Run("apt-get update".to_string())));
        assert_eq!(script.statements[1], (4, Command::Eval("ls /".to_string())));
        assert_eq!(script.statements[2], (5, Command::Back(1)));
    }

    #[test]
    fn test_script_error_has_line_number() {
        let err = parse_script(":run a\n:frobnicate\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
