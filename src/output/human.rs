//! Human-readable output formatting

use crate::engine::{ExecutionResult, ResultData};
use crate::workspace::Step;

pub fn format_human(result: &ExecutionResult) -> String {
    match &result.data {
        ResultData::Step(step) => format_step(step),
        ResultData::Committed { image } => format!("Committed {}", image),
        ResultData::Retracted { count } => format!(
            "Retracted {} step(s), now at {}",
            count, result.active_image
        ),
        ResultData::ImageSet { image } => format!("Base image set to {}", image),
        ResultData::Lines { lines } => lines.join("\n"),
        ResultData::Written { path } => format!("Wrote {}", path.display()),
        ResultData::History { steps } => format_history(steps),
    }
}

/// One-line summary of a step, e.g. `[c3] exit 0 in 1.20s -> i3`
pub fn format_step(step: &Step) -> String {
    let mut output = format!(
        "[{}] exit {} in {:.2}s",
        short_id(&step.id),
        step.exit_code,
        step.duration.as_secs_f64()
    );
    if let Some(image) = step.new_image() {
        output.push_str(&format!(" -> {}", short_id(image)));
    }
    if let Some(text) = step.output.as_deref().map(str::trim_end).filter(|t| !t.is_empty()) {
        output.push('\n');
        output.push_str(text);
    }
    output
}

pub fn format_history(steps: &[Step]) -> String {
    if steps.is_empty() {
        return "No steps recorded".to_string();
    }

    let mut output = String::from("History\n-------\n");
    output.push_str(&format!(
        "{:>4} {:<14} {:<14} {:>5} {:>9}  {}\n",
        "#", "CONTAINER", "IMAGE", "EXIT", "TIME", "COMMAND"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for step in steps {
        let image = step.new_image().map(short_id).unwrap_or("-");
        let marker = if step.deleted { " (retracted)" } else { "" };
        output.push_str(&format!(
            "{:>4} {:<14} {:<14} {:>5} {:>8.2}s  {}{}\n",
            step.seq,
            truncate(short_id(&step.id), 14),
            truncate(image, 14),
            step.exit_code,
            step.duration.as_secs_f64(),
            truncate(&step.command, 40),
            marker
        ));
    }
    output
}

/// Docker ids are long hex strings; show the first 12 characters
fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(12) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Layer;
    use chrono::Utc;
    use std::time::Duration;

    fn step(command: &str, layer: Option<&str>, deleted: bool) -> Step {
        Step {
            command: command.to_string(),
            id: "c1".to_string(),
            seq: 1,
            base_image: "ubuntu:trusty".to_string(),
            image: "ubuntu:trusty".to_string(),
            layer: layer.map(|image| Layer {
                image: image.to_string(),
                seq: 1,
            }),
            exit_code: 0,
            duration: Duration::from_millis(1500),
            output: None,
            started_at: Utc::now(),
            deleted,
        }
    }

    #[test]
    fn test_format_step() {
        assert_eq!(format_step(&step("ls", Some("i1"), false)), "[c1] exit 0 in 1.50s -> i1");
        assert_eq!(format_step(&step("ls", None, false)), "[c1] exit 0 in 1.50s");
    }

    #[test]
    fn test_format_step_includes_output() {
        let mut recorded = step("cat /etc/issue", None, false);
        recorded.output = Some("Ubuntu 14.04 LTS\n".to_string());
        assert_eq!(format_step(&recorded), "[c1] exit 0 in 1.50s\nUbuntu 14.04 LTS");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("sha256:0123456789abcdef"), "0123456789ab");
        assert_eq!(short_id("c1"), "c1");
    }

    #[test]
    fn test_history_marks_retracted() {
        let output = format_history(&[step("apt-get update", Some("i1"), true)]);
        assert!(output.contains("apt-get update (retracted)"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[]), "No steps recorded");
    }
}
