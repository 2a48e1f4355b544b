//! Generation Service - main application orchestrator.
//!
//! Runs one generation from start to finish:
//! 1. Interview the user
//! 2. Derive `package.json`, `tsconfig.json` and the script patch plan
//! 3. Write files through [`ProtectedFs`]
//! 4. Install dependencies (failure is reported, not fatal)
//! 5. Patch the host scripts
//! 6. Append ignore rules
//!
//! Any other failure aborts the remaining stages. Nothing already written is
//! rolled back.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        GenerationMode, GenerationReport, GenerationStage, InstallStatus,
        ports::{CommandRunner, Filesystem, Prompter, ScriptPatcher},
        services::{AnswerCollector, ProtectedFs},
    },
    domain::{
        IdentityContext, ManifestBuilder, ProjectIdentifier, patch_plan, to_json_pretty,
    },
    error::{Context, KelpResult},
};

/// Dependencies installed into every generated project.
pub const DEFAULT_INSTALL_COMMAND: &str = "npm i typescript @types/node -D";

/// The host's metadata directory inside a project.
pub const DEFAULT_HOST_DIR: &str = "nautus";

/// Everything the host lends to a generation run.
pub struct Host {
    pub prompter: Box<dyn Prompter>,
    pub filesystem: Box<dyn Filesystem>,
    pub runner: Box<dyn CommandRunner>,
    pub scripts: Box<dyn ScriptPatcher>,
}

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub project_dir: PathBuf,
    pub identifier: ProjectIdentifier,
    pub identity: IdentityContext,
    pub mode: GenerationMode,
    /// `None` skips the install stage.
    pub install_command: Option<String>,
    pub host_dir: String,
}

impl GenerationRequest {
    pub fn new(project_dir: impl Into<PathBuf>, identifier: ProjectIdentifier) -> Self {
        Self {
            project_dir: project_dir.into(),
            identifier,
            identity: IdentityContext::default(),
            mode: GenerationMode::Fresh,
            install_command: Some(DEFAULT_INSTALL_COMMAND.into()),
            host_dir: DEFAULT_HOST_DIR.into(),
        }
    }

    pub fn with_identity(mut self, identity: IdentityContext) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_install_command(mut self, command: impl Into<String>) -> Self {
        self.install_command = Some(command.into());
        self
    }

    pub fn skip_install(mut self) -> Self {
        self.install_command = None;
        self
    }

    pub fn with_host_dir(mut self, host_dir: impl Into<String>) -> Self {
        self.host_dir = host_dir.into();
        self
    }

    /// Lines appended to `.npmignore`.
    pub fn npm_ignore_rules(&self) -> String {
        format!("lib/\n.dccache\n{}\n", self.host_dir)
    }
}

pub struct GenerationService {
    host: Host,
}

impl GenerationService {
    pub fn new(host: Host) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Generate the TypeScript scaffold described by `request`.
    #[instrument(
        skip_all,
        fields(
            identifier = %request.identifier,
            mode = %request.mode,
            project_dir = %request.project_dir.display()
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> KelpResult<GenerationReport> {
        info!("Generating TypeScript project");

        let mut report = GenerationReport::new(request.mode, request.identifier.clone());
        let prompter = self.host.prompter.as_ref();

        // 1. Collect answers
        let answers =
            AnswerCollector::new(prompter).collect(&request.identity, &request.identifier)?;
        report.entry_point = answers.entry_point;
        Self::complete(&mut report, GenerationStage::CollectAnswers);

        // 2. Build manifest, compiler config and patch plan
        let (manifest, compiler) =
            ManifestBuilder::build(&request.identity, &request.identifier, &answers);
        let manifest_json = to_json_pretty(&manifest).context("serializing package.json")?;
        let compiler_json = to_json_pretty(&compiler).context("serializing tsconfig.json")?;
        let plan = patch_plan(&answers)?;
        Self::complete(&mut report, GenerationStage::BuildManifest);

        let fs = ProtectedFs::new(&request.project_dir, self.host.filesystem.as_ref(), prompter);

        // 3. Manifest files
        report.record("package.json", fs.write("package.json", &manifest_json)?);
        report.record("README.md", fs.ensure_file("README.md")?);
        Self::complete(&mut report, GenerationStage::WriteManifestFiles);

        // 4. Install, never fatal
        report.install = self.install(request.install_command.as_deref());
        Self::complete(&mut report, GenerationStage::RunDependencyInstall);

        // 5. Compiler config
        report.record("tsconfig.json", fs.write("tsconfig.json", &compiler_json)?);
        Self::complete(&mut report, GenerationStage::WriteCompilerConfig);

        // 6. Entry source
        let entry = PathBuf::from("src").join(answers.entry_point.as_str());
        report.record("src", fs.ensure_dir("src")?);
        report.record(&entry, fs.ensure_file(&entry)?);
        Self::complete(&mut report, GenerationStage::ScaffoldEntrySource);

        // 7. Host scripts
        for step in &plan {
            self.host.scripts.apply(step)?;
            if !report.patched_scripts.contains(step.script()) {
                report.patched_scripts.push(step.script().clone());
            }
        }
        Self::complete(&mut report, GenerationStage::PatchScripts);

        // 8. Ignore rules
        report.record(".npmignore", fs.append(".npmignore", &request.npm_ignore_rules())?);
        Self::complete(&mut report, GenerationStage::AppendIgnoreRules);

        Self::complete(&mut report, GenerationStage::Report);

        let skipped = report.skipped().count();
        if skipped > 0 {
            warn!(skipped, "Some files were kept because overwriting was declined");
        }
        info!(run_id = %report.run_id, "Generation completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn install(&self, command: Option<&str>) -> InstallStatus {
        let Some(command) = command else {
            info!("Dependency install skipped");
            return InstallStatus::Skipped;
        };

        info!(command, "Installing dependencies");
        match self.host.runner.run(command) {
            Ok(output) if output.success() => InstallStatus::Succeeded {
                command: command.to_string(),
            },
            Ok(output) => {
                warn!(
                    command,
                    exit_code = output.exit_code,
                    "Dependency install failed, continuing"
                );
                InstallStatus::Failed {
                    command: command.to_string(),
                    exit_code: Some(output.exit_code),
                    reason: format!("exited with status {}", output.exit_code),
                }
            }
            Err(e) => {
                warn!(command, error = %e, "Dependency install could not start, continuing");
                InstallStatus::Failed {
                    command: command.to_string(),
                    exit_code: None,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn complete(report: &mut GenerationReport, stage: GenerationStage) {
        info!(stage = %stage, "Stage complete");
        report.stages.push(stage);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use mockall::predicate::eq;

    use super::*;
    use crate::application::{
        ApplicationError, WriteOutcome,
        ports::{
            CommandOutput, MockCommandRunner, NumberValidator, SelectionBounds, TextPrompt,
            ToggleSide,
        },
        services::fakes::{FakeFs, QueuePrompter},
    };
    use crate::domain::{PatchStep, ScriptName};
    use crate::error::KelpResult;

    const ROOT: &str = "/work/my-lib";

    /// Records patch calls; fails on the `missing` script.
    #[derive(Clone, Default)]
    struct SpyScripts {
        calls: Arc<Mutex<Vec<String>>>,
        missing: Option<&'static str>,
    }

    impl ScriptPatcher for SpyScripts {
        fn remove_default(&self, script: &ScriptName) -> KelpResult<bool> {
            self.check(script)?;
            self.calls
                .lock()
                .unwrap()
                .push(format!("remove {script}"));
            Ok(true)
        }

        fn merge(&self, script: &ScriptName, code: &str) -> KelpResult<()> {
            self.check(script)?;
            self.calls
                .lock()
                .unwrap()
                .push(format!("merge {script}: {code}"));
            Ok(())
        }
    }

    impl SpyScripts {
        fn check(&self, script: &ScriptName) -> KelpResult<()> {
            if self.missing == Some(script.as_str()) {
                return Err(ApplicationError::UnknownScript {
                    script: script.to_string(),
                    path: PathBuf::from("nautus").join(script.file_name()),
                }
                .into());
            }
            Ok(())
        }
    }

    /// Shares one `FakeFs` between the service and the test body.
    struct SharedFs(Arc<FakeFs>);

    impl Filesystem for SharedFs {
        fn create_dir_all(&self, path: &Path) -> KelpResult<()> {
            self.0.create_dir_all(path)
        }
        fn write_file(&self, path: &Path, content: &str) -> KelpResult<()> {
            self.0.write_file(path, content)
        }
        fn append_file(&self, path: &Path, content: &str) -> KelpResult<()> {
            self.0.append_file(path, content)
        }
        fn read_to_string(&self, path: &Path) -> KelpResult<String> {
            self.0.read_to_string(path)
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }
    }

    struct SharedPrompter(Arc<QueuePrompter>);

    impl Prompter for SharedPrompter {
        fn text(&self, prompt: &TextPrompt) -> KelpResult<String> {
            self.0.text(prompt)
        }
        fn confirm(&self, question: &str) -> KelpResult<bool> {
            self.0.confirm(question)
        }
        fn toggle(&self, question: &str, options: [&str; 2]) -> KelpResult<ToggleSide> {
            self.0.toggle(question, options)
        }
        fn numeral(&self, question: &str, validator: &NumberValidator) -> KelpResult<f64> {
            self.0.numeral(question, validator)
        }
        fn select(&self, question: &str, choices: &[&str]) -> KelpResult<usize> {
            self.0.select(question, choices)
        }
        fn multi_select(
            &self,
            question: &str,
            choices: &[&str],
            bounds: SelectionBounds,
        ) -> KelpResult<Vec<usize>> {
            self.0.multi_select(question, choices, bounds)
        }
    }

    const MY_LIB: [&str; 6] = ["", "index.ts", "MIT", "n", "ESNext", "commonjs"];

    struct Fixture {
        fs: Arc<FakeFs>,
        scripts: SpyScripts,
        service: GenerationService,
    }

    fn fixture(fs: FakeFs, answers: &[&str], runner: MockCommandRunner, scripts: SpyScripts) -> Fixture {
        let fs = Arc::new(fs);
        let prompter = Arc::new(QueuePrompter::new(answers.iter().copied()));
        let service = GenerationService::new(Host {
            prompter: Box::new(SharedPrompter(prompter)),
            filesystem: Box::new(SharedFs(fs.clone())),
            runner: Box::new(runner),
            scripts: Box::new(scripts.clone()),
        });
        Fixture { fs, scripts, service }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(ROOT, ProjectIdentifier::parse("my-lib").unwrap())
    }

    fn ok_runner() -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .with(eq(DEFAULT_INSTALL_COMMAND))
            .times(1)
            .returning(|_| {
                Ok(CommandOutput {
                    exit_code: 0,
                    stdout: String::new(),
                })
            });
        runner
    }

    #[test]
    fn generates_full_scaffold() {
        let f = fixture(FakeFs::default(), &MY_LIB, ok_runner(), SpyScripts::default());
        let report = f.service.generate(&request()).unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&f.fs.content(format!("{ROOT}/package.json")).unwrap()).unwrap();
        assert_eq!(manifest["name"], "my-lib");
        assert_eq!(manifest["main"], "dist/index.js");
        assert!(manifest.get("repository").is_none());

        let tsconfig: serde_json::Value =
            serde_json::from_str(&f.fs.content(format!("{ROOT}/tsconfig.json")).unwrap()).unwrap();
        assert!(tsconfig["compilerOptions"].get("moduleResolution").is_none());

        assert_eq!(f.fs.content(format!("{ROOT}/README.md")).as_deref(), Some(""));
        assert_eq!(f.fs.content(format!("{ROOT}/src/index.ts")).as_deref(), Some(""));
        assert_eq!(
            f.fs.content(format!("{ROOT}/.npmignore")).as_deref(),
            Some("lib/\n.dccache\nnautus\n")
        );

        assert_eq!(report.stages, GenerationStage::ALL.to_vec());
        assert_eq!(report.entry_source(), "./src/index.ts");
        assert!(matches!(report.install, InstallStatus::Succeeded { .. }));
        let patched: Vec<_> = report.patched_scripts.iter().map(ScriptName::as_str).collect();
        assert_eq!(patched, ["Build", "Prep", "Run"]);
    }

    #[test]
    fn scripts_are_patched_in_plan_order() {
        let f = fixture(FakeFs::default(), &MY_LIB, ok_runner(), SpyScripts::default());
        f.service.generate(&request()).unwrap();

        let calls = f.scripts.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0], "remove Build");
        assert!(calls[1].starts_with("merge Build:"));
        assert!(calls[2].starts_with("merge Prep:"));
        assert_eq!(calls[3], "remove Run");
        assert!(calls[4].contains("dist/index.js"));
    }

    #[test]
    fn failed_install_does_not_block_later_stages() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(CommandOutput {
                exit_code: 1,
                stdout: "npm ERR!".into(),
            })
        });
        let f = fixture(FakeFs::default(), &MY_LIB, runner, SpyScripts::default());
        let report = f.service.generate(&request()).unwrap();

        assert_eq!(
            report.install,
            InstallStatus::Failed {
                command: DEFAULT_INSTALL_COMMAND.into(),
                exit_code: Some(1),
                reason: "exited with status 1".into(),
            }
        );
        assert!(report.completed(GenerationStage::PatchScripts));
        assert!(f.fs.content(format!("{ROOT}/tsconfig.json")).is_some());
    }

    #[test]
    fn install_that_cannot_start_is_recorded() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|cmd| {
            Err(ApplicationError::CommandFailed {
                command: cmd.to_string(),
                reason: "No such file or directory".into(),
            }
            .into())
        });
        let f = fixture(FakeFs::default(), &MY_LIB, runner, SpyScripts::default());
        let report = f.service.generate(&request()).unwrap();

        assert!(matches!(report.install, InstallStatus::Failed { exit_code: None, .. }));
        assert!(report.completed(GenerationStage::AppendIgnoreRules));
    }

    #[test]
    fn skipped_install_never_runs_a_command() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        let f = fixture(FakeFs::default(), &MY_LIB, runner, SpyScripts::default());
        let report = f.service.generate(&request().skip_install()).unwrap();
        assert_eq!(report.install, InstallStatus::Skipped);
    }

    #[test]
    fn declined_overwrite_keeps_existing_manifest() {
        let existing = "{\"name\": \"keep-me\"}";
        let fs = FakeFs::default().with_file(format!("{ROOT}/package.json"), existing);
        let mut answers = MY_LIB.to_vec();
        answers.push("n");
        let f = fixture(fs, &answers, ok_runner(), SpyScripts::default());

        let report = f.service.generate(&request()).unwrap();
        assert_eq!(report.outcome_of("package.json"), Some(WriteOutcome::Skipped));
        assert_eq!(
            f.fs.content(format!("{ROOT}/package.json")).as_deref(),
            Some(existing)
        );
        assert!(report.completed(GenerationStage::Report));
    }

    #[test]
    fn cancelled_interview_aborts_before_writing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        let f = fixture(FakeFs::default(), &MY_LIB[..2], runner, SpyScripts::default());

        let err = f.service.generate(&request()).unwrap_err();
        assert!(err.is_cancelled());
        assert!(f.fs.content(format!("{ROOT}/package.json")).is_none());
        assert!(f.scripts.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_script_is_fatal_configuration_error() {
        let scripts = SpyScripts {
            missing: Some("Prep"),
            ..Default::default()
        };
        let f = fixture(FakeFs::default(), &MY_LIB, ok_runner(), scripts);

        let err = f.service.generate(&request()).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::Configuration);
        // The ignore rules come after patching and must not have been written.
        assert!(f.fs.content(format!("{ROOT}/.npmignore")).is_none());
    }

    #[test]
    fn ignore_rules_follow_host_dir() {
        let req = request().with_host_dir(".host");
        assert_eq!(req.npm_ignore_rules(), "lib/\n.dccache\n.host\n");
    }

    #[test]
    fn patch_steps_name_their_script() {
        let step = PatchStep::RemoveDefault(ScriptName::new("Run").unwrap());
        assert_eq!(step.script().as_str(), "Run");
    }
}
