#![allow(dead_code)]

use std::path::Path;

use taskseq::config::{ConfigFile, ConfigSection, RawConfigFile, RawStep, StepKind};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                step: Vec::new(),
            },
        }
    }

    pub fn queue_length(mut self, len: usize) -> Self {
        self.config.config.queue_length = len;
        self
    }

    pub fn with_step(mut self, step: RawStep) -> Self {
        self.config.step.push(step);
        self
    }

    /// The raw, unvalidated file (for exercising validation errors).
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawStep`.
pub struct StepBuilder {
    step: RawStep,
}

impl StepBuilder {
    pub fn command(name: &str, cmd: &str) -> Self {
        let mut step = RawStep::new(name, StepKind::Command);
        step.cmd = Some(cmd.to_string());
        Self { step }
    }

    /// `sh -c <script>`.
    pub fn shell(name: &str, script: &str) -> Self {
        Self::command(name, "sh").arg("-c").arg(script)
    }

    pub fn copy(name: &str, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Self {
        let mut step = RawStep::new(name, StepKind::Copy);
        step.from = Some(from.as_ref().to_path_buf());
        step.to = Some(to.as_ref().to_path_buf());
        Self { step }
    }

    pub fn write(name: &str, path: impl AsRef<Path>, contents: &str) -> Self {
        let mut step = RawStep::new(name, StepKind::Write);
        step.path = Some(path.as_ref().to_path_buf());
        step.contents = Some(contents.to_string());
        Self { step }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.step.args.push(arg.to_string());
        self
    }

    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.step.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn missing_ok(mut self, val: bool) -> Self {
        self.step.missing_ok = val;
        self
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.step.mode = Some(mode);
        self
    }

    pub fn build(self) -> RawStep {
        self.step
    }
}
