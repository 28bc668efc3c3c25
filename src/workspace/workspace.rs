//! The image-building session
//!
//! A `Workspace` tracks which image the next command runs against, every
//! command executed so far, and the build-file lines for the steps that are
//! still live. Every operation either applies completely or leaves the
//! workspace as it was.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use super::step::{Layer, Step};
use crate::client::ExecutionClient;
use crate::error::{ImgshellError, Result};
use crate::output::Mode;

/// Session state for one interactive image build
#[derive(Debug)]
pub struct Workspace<C> {
    client: C,
    mode: Mode,
    /// Image the session started from (or was reset to)
    image: String,
    /// Image the next command runs against
    active_image: String,
    history: Vec<Step>,
    /// One line per live committed step, in execution order
    rendered: Vec<String>,
    container_seq: u64,
    image_seq: u64,
}

impl<C: ExecutionClient> Workspace<C> {
    /// Start a session on `image`
    pub fn new(client: C, mode: Mode, image: impl Into<String>) -> Self {
        let image = image.into();
        Self {
            client,
            mode,
            active_image: image.clone(),
            image,
            history: Vec::new(),
            rendered: Vec::new(),
            container_seq: 0,
            image_seq: 0,
        }
    }

    /// Reset the base image; the next command runs against it.
    ///
    /// History and rendered lines are left alone, so steps recorded before
    /// the reset keep the base image they were recorded with.
    pub fn set_image(&mut self, image: impl Into<String>) {
        let image = image.into();
        info!(%image, "base image reset");
        self.active_image = image.clone();
        self.image = image;
    }

    /// Run `command` and commit the result as a new layer
    pub fn run(&mut self, command: &str) -> Result<Step> {
        self.run_with(command, false)
    }

    /// Like `run`, with control over whether the client attaches the terminal.
    ///
    /// The layer is committed whatever the command's exit code is.
    pub fn run_with(&mut self, command: &str, interactive: bool) -> Result<Step> {
        let started_at = Utc::now();
        let execution = self.client.run(&self.active_image, command, interactive)?;
        let new_image = self.client.commit(&execution.container)?;

        self.container_seq += 1;
        self.image_seq += 1;

        let step = Step {
            command: command.to_string(),
            id: execution.container,
            seq: self.container_seq,
            base_image: self.image.clone(),
            image: self.active_image.clone(),
            layer: Some(Layer {
                image: new_image.clone(),
                seq: self.image_seq,
            }),
            exit_code: execution.exit_code,
            duration: execution.duration,
            output: execution.output,
            started_at,
            deleted: false,
        };
        info!(
            container = %step.id,
            from = %step.image,
            to = %new_image,
            exit_code = step.exit_code,
            "committed layer"
        );

        self.active_image = new_image;
        self.rendered.push(self.mode.step_line(command));
        self.history.push(step.clone());
        Ok(step)
    }

    /// Run `command` without committing it.
    ///
    /// The active image and rendered lines are unchanged; `commit_last` can
    /// still turn the step into a layer afterwards.
    pub fn eval(&mut self, command: &str, interactive: bool) -> Result<Step> {
        let started_at = Utc::now();
        let execution = self.client.run(&self.active_image, command, interactive)?;

        self.container_seq += 1;

        let step = Step {
            command: command.to_string(),
            id: execution.container,
            seq: self.container_seq,
            base_image: self.image.clone(),
            image: self.active_image.clone(),
            layer: None,
            exit_code: execution.exit_code,
            duration: execution.duration,
            output: execution.output,
            started_at,
            deleted: false,
        };
        debug!(container = %step.id, image = %step.image, exit_code = step.exit_code, "evaluated");

        self.history.push(step.clone());
        Ok(step)
    }

    /// Commit the container of the most recent live step.
    ///
    /// The step is committed even if the active image has moved on since it
    /// ran (after `set_image` or `back`); its layer becomes the active image.
    /// Returns the new image reference.
    pub fn commit_last(&mut self) -> Result<String> {
        let index = self
            .history
            .iter()
            .rposition(|step| !step.deleted)
            .ok_or_else(|| ImgshellError::UsageError("No step to commit".to_string()))?;

        let step = &self.history[index];
        if let Some(image) = step.new_image() {
            return Err(ImgshellError::UsageError(format!(
                "Last step '{}' is already committed as {}",
                step.command, image
            )));
        }
        let new_image = self.client.commit(&step.id)?;
        self.image_seq += 1;

        let step = &mut self.history[index];
        step.layer = Some(Layer {
            image: new_image.clone(),
            seq: self.image_seq,
        });
        info!(container = %step.id, to = %new_image, "committed last step");

        self.rendered.push(self.mode.step_line(&step.command));
        self.active_image = new_image.clone();
        Ok(new_image)
    }

    /// Retract the last `n` committed steps.
    ///
    /// The steps stay in history marked as deleted; the active image goes
    /// back to the one the earliest retracted step ran against.
    pub fn back(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Ok(());
        }

        let selected: Vec<usize> = self
            .history
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, step)| step.is_live_layer())
            .map(|(index, _)| index)
            .take(n)
            .collect();

        if selected.len() < n {
            return Err(ImgshellError::UsageError(format!(
                "Cannot go back {} step(s): only {} committed step(s) in the session",
                n,
                selected.len()
            )));
        }

        let restored = self.history[selected[n - 1]].image.clone();
        for index in &selected {
            self.history[*index].deleted = true;
        }
        let keep = self.rendered.len().saturating_sub(n);
        self.rendered.truncate(keep);

        info!(count = n, image = %restored, "retracted steps");
        self.active_image = restored;
        Ok(())
    }

    /// The build file for the current session, one entry per line
    pub fn sprint(&self) -> Vec<String> {
        let mut lines = self.mode.header(&self.image);
        lines.extend(self.rendered.iter().cloned());
        lines
    }

    /// Write `sprint()` to `path`, one line each
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in self.sprint() {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        info!(path = %path.display(), "wrote build file");
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The base image
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn active_image(&self) -> &str {
        &self.active_image
    }

    /// Every recorded step, including retracted ones
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }
}
