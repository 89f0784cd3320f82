use anyhow::Context;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

use crate::arguments::ArgumentList;
use crate::config::{expand_path, BuildConfig};
use crate::environment::EnvStore;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::projects::{BuildRequest, OutputRedirect, ProjectRegistry};
use crate::publish::PublishState;
use crate::runner::CommandRunner;
use crate::ui;
use crate::util::fs::{copy_dir_all, copy_file, ensure_dir};

/// Where a run sends its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Straight into the Reloaded-II mods folder.
    Local,
    /// Into the publish workspace, then packaged.
    Publish,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Local => "local",
            Mode::Publish => "publish",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PublishSetup,
    AcquireBinding,
    BuildNative,
    BuildManaged,
    StageOutputs,
    Finalize,
}

impl Step {
    fn label(self) -> &'static str {
        match self {
            Step::PublishSetup => "Preparing",
            Step::AcquireBinding => "Binding",
            Step::BuildNative | Step::BuildManaged => "Compiling",
            Step::StageOutputs => "Staging",
            Step::Finalize => "Packaging",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::PublishSetup => "publish-setup",
            Step::AcquireBinding => "acquire-binding",
            Step::BuildNative => "build-native",
            Step::BuildManaged => "build-managed",
            Step::StageOutputs => "stage-outputs",
            Step::Finalize => "finalize",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// What a finished run did.
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: Mode,
    pub steps: Vec<StepRecord>,
    pub elapsed: Duration,
    /// Directory the outputs were staged into.
    pub destination: PathBuf,
    /// Files copied into `destination` by the staging step.
    pub staged: Vec<PathBuf>,
    /// Bundle directory when publishing.
    pub bundle: Option<PathBuf>,
}

/// Runs the whole build for one mod.
///
/// Construction parses the toggles, checks the deployment variable and loads
/// both configuration files before any step runs.
pub struct Executor<'a> {
    root: PathBuf,
    args: ArgumentList,
    config: BuildConfig,
    env: EnvStore,
    projects: ProjectRegistry,
    deploy_dir: PathBuf,
    publish: Option<PublishState>,
    fetcher: &'a dyn Fetcher,
    runner: &'a dyn CommandRunner,
    records: Vec<StepRecord>,
}

impl<'a> Executor<'a> {
    pub fn new<S: AsRef<str>>(
        root: &Path,
        tokens: &[S],
        external: HashMap<String, String>,
        fetcher: &'a dyn Fetcher,
        runner: &'a dyn CommandRunner,
    ) -> Result<Self> {
        let args = ArgumentList::parse(tokens)?;
        let config = BuildConfig::load(root)?;

        let mods_dir = external
            .get(&config.deploy_variable)
            .filter(|value| !value.is_empty())
            .map(|value| expand_path(value))
            .ok_or_else(|| Error::MissingVariable(config.deploy_variable.clone()))?;
        let deploy_dir = mods_dir.join(&config.mod_id);

        let env = EnvStore::load_with(root, external)?;
        let projects = ProjectRegistry::from_config(root, &config);
        let publish = args
            .publish()
            .then(|| PublishState::new(root, &config.mod_id, &config.publish));

        Ok(Self {
            root: root.to_path_buf(),
            args,
            config,
            env,
            projects,
            deploy_dir,
            publish,
            fetcher,
            runner,
            records: Vec::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        if self.publish.is_some() {
            Mode::Publish
        } else {
            Mode::Local
        }
    }

    /// `$RELOADEDIIMODS/<mod-id>`.
    pub fn deploy_dir(&self) -> &Path {
        &self.deploy_dir
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.args
    }

    pub fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    /// Steps finished so far, including a failed one.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn execute(&mut self) -> anyhow::Result<Report> {
        let started = Instant::now();
        ui::status(
            "Building",
            format!(
                "{} ({} mode, {})",
                self.config.mod_id,
                self.mode(),
                if self.args.debug() { "debug" } else { "release" }
            ),
        );

        let result = match self.publish.clone() {
            Some(publish) => self.run_publish(&publish),
            None => self.run_local(),
        };
        let elapsed = started.elapsed();
        self.print_summary(elapsed, result.is_ok());

        let (destination, staged, bundle) = result?;
        Ok(Report {
            mode: self.mode(),
            steps: self.records.clone(),
            elapsed,
            destination,
            staged,
            bundle,
        })
    }

    fn run_local(&mut self) -> anyhow::Result<(PathBuf, Vec<PathBuf>, Option<PathBuf>)> {
        self.acquire_binding(false)?;
        self.step(Step::BuildNative, |this| this.build(&this.config.native.name, None))?;
        self.step(Step::BuildManaged, |this| this.build(&this.config.managed.name, None))?;

        let destination = self.deploy_dir.clone();
        let staged = self.step(Step::StageOutputs, |this| this.stage_outputs(&destination))?;
        Ok((destination, staged, None))
    }

    fn run_publish(
        &mut self,
        publish: &PublishState,
    ) -> anyhow::Result<(PathBuf, Vec<PathBuf>, Option<PathBuf>)> {
        self.step(Step::PublishSetup, |this| {
            publish.cleanup()?;
            publish.get_tools(this.fetcher)
        })?;
        self.acquire_binding(true)?;
        self.step(Step::BuildNative, |this| this.build(&this.config.native.name, None))?;

        // The managed publish may package the folder itself, so it must be complete first.
        let destination = publish.build_output();
        let staged = self.step(Step::StageOutputs, |this| this.stage_outputs(&destination))?;
        let redirect = publish.redirect();
        self.step(Step::BuildManaged, |this| {
            this.build(&this.config.managed.name, Some(&redirect))
        })?;

        let bundle = self.step(Step::Finalize, |this| publish.create_artifacts(this.runner))?;
        Ok((destination, staged, Some(bundle)))
    }

    /// Run one step, recording its outcome and attaching the step name to errors.
    fn step<T>(
        &mut self,
        step: Step,
        body: impl FnOnce(&Self) -> Result<T>,
    ) -> anyhow::Result<T> {
        let progress = ui::Progress::new(step.label(), step.to_string());
        match body(self) {
            Ok(value) => {
                let elapsed = progress.success("Finished", None);
                self.record(step, Outcome::Done, elapsed);
                Ok(value)
            }
            Err(err) => {
                let elapsed = progress.fail("Failed", &err);
                self.record(step, Outcome::Failed, elapsed);
                Err(err).with_context(|| format!("{step} step failed"))
            }
        }
    }

    fn record(&mut self, step: Step, outcome: Outcome, elapsed: Duration) {
        self.records.push(StepRecord {
            step,
            outcome,
            elapsed,
        });
    }

    fn acquire_binding(&mut self, remote: bool) -> anyhow::Result<()> {
        let native_root = self.projects.get(&self.config.native.name)?.root().to_path_buf();
        ensure_dir(&native_root.join(&self.config.native.working_dir))
            .context("acquire-binding step failed")?;

        if self.args.skip_globals() {
            let progress = ui::Progress::new(
                Step::AcquireBinding.label(),
                Step::AcquireBinding.to_string(),
            );
            let elapsed = progress.skip("SkipGlobals is set");
            self.record(Step::AcquireBinding, Outcome::Skipped, elapsed);
            return Ok(());
        }

        let target = native_root.join(&self.config.binding.target);
        self.step(Step::AcquireBinding, |this| {
            if remote {
                this.fetcher.fetch(&this.config.binding.url, &target)
            } else {
                let checkout = expand_path(this.env.get(&this.config.binding.env_key)?);
                copy_file(&checkout.join(&this.config.binding.source), &target)
            }
        })
    }

    fn build(&self, name: &str, redirect: Option<&OutputRedirect>) -> Result<()> {
        let project = self.projects.get(name)?;
        project.build(&BuildRequest {
            debug: self.args.debug(),
            env: &self.env,
            runner: self.runner,
            redirect,
        })
    }

    /// Copy native artifacts and the static data folder into `destination`.
    fn stage_outputs(&self, destination: &Path) -> Result<Vec<PathBuf>> {
        ensure_dir(destination)?;
        let native = self.projects.get(&self.config.native.name)?;
        let mut staged = self
            .projects
            .artifact_source(&self.config.native.name)?
            .copy_artifacts(self.args.debug(), &self.root, destination)?;

        let data_dir = native.root().join(&self.config.native.data_dir);
        if data_dir.is_dir() {
            staged.extend(copy_dir_all(&data_dir, destination)?);
        } else {
            info!("No data directory at {}", data_dir.display());
        }
        Ok(staged)
    }

    fn print_summary(&self, elapsed: Duration, succeeded: bool) {
        let steps = self
            .records
            .iter()
            .map(|record| {
                let marker = match record.outcome {
                    Outcome::Done => "ok",
                    Outcome::Skipped => "skipped",
                    Outcome::Failed => "FAILED",
                };
                if self.args.timings() {
                    format!(
                        "{} {marker} ({})",
                        record.step,
                        ui::format_duration(record.elapsed)
                    )
                } else {
                    format!("{} {marker}", record.step)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let total = ui::format_duration(elapsed);
        if succeeded {
            ui::success(
                "Done",
                format!(
                    "{} {} build in {total}\n{steps}",
                    self.config.mod_id,
                    self.mode()
                ),
            );
        } else {
            ui::error(format!(
                "{} {} build failed after {total}\n{steps}",
                self.config.mod_id,
                self.mode()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use crate::environment::ENV_LOCAL_FILE;
    use crate::runner::{Invocation, ProcessOutput};
    use std::cell::RefCell;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const REMOTE_GLOBALS: &str = "// remote globals\n";
    const LOCAL_GLOBALS: &str = "// local globals\n";

    /// Stands in for cargo, dotnet and the packager.
    struct FakeToolchain {
        root: PathBuf,
        mods_dir: PathBuf,
        fail_native: bool,
        calls: RefCell<Vec<Invocation>>,
    }

    impl FakeToolchain {
        fn new(fixture: &Fixture) -> Self {
            Self {
                root: fixture.root.path().to_path_buf(),
                mods_dir: fixture.mods.path().to_path_buf(),
                fail_native: false,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn programs(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|call| {
                    call.program
                        .file_name()
                        .unwrap()
                        .to_string_lossy()
                        .into_owned()
                })
                .collect()
        }
    }

    impl CommandRunner for FakeToolchain {
        fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            let ok = ProcessOutput {
                success: true,
                code: Some(0),
                ..Default::default()
            };

            match &*invocation.program.to_string_lossy() {
                "cargo" => {
                    if self.fail_native {
                        return Ok(ProcessOutput {
                            success: false,
                            code: Some(101),
                            stdout: String::new(),
                            stderr: "error[E0432]: unresolved import `opengfd`".to_string(),
                        });
                    }
                    let profile = if invocation.has_arg("--release") {
                        "release"
                    } else {
                        "debug"
                    };
                    let out = self.root.join("target").join(profile);
                    fs::create_dir_all(&out).unwrap();
                    fs::write(out.join("p5r_freecam.dll"), profile).unwrap();
                    fs::write(out.join("p5r_freecam.pdb"), profile).unwrap();
                    Ok(ok)
                }
                "dotnet" => {
                    let out = match invocation.arg_after("-o") {
                        Some(dir) => PathBuf::from(dir),
                        None => self.mods_dir.join("p5rpc.freecam"),
                    };
                    fs::create_dir_all(&out).unwrap();
                    fs::write(out.join("p5rpc.freecam.dll"), "managed").unwrap();
                    fs::write(out.join("ModConfig.json"), "{}").unwrap();
                    Ok(ok)
                }
                _ => {
                    let out = PathBuf::from(invocation.arg_after("--outputfolder").unwrap());
                    fs::write(out.join("p5rpc.freecam.7z"), "bundle").unwrap();
                    Ok(ok)
                }
            }
        }
    }

    #[derive(Default)]
    struct FakeFetcher {
        urls: RefCell<Vec<String>>,
    }

    impl Fetcher for FakeFetcher {
        fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
            self.urls.borrow_mut().push(url.to_string());
            fs::create_dir_all(dest.parent().unwrap()).unwrap();
            if url.ends_with(".zip") {
                let mut writer = zip::ZipWriter::new(fs::File::create(dest).unwrap());
                writer
                    .start_file("Reloaded.Publisher.exe", zip::write::FileOptions::default())
                    .unwrap();
                writer.write_all(b"MZ").unwrap();
                writer.finish().unwrap();
            } else {
                fs::write(dest, REMOTE_GLOBALS).unwrap();
            }
            Ok(())
        }
    }

    struct Fixture {
        root: TempDir,
        mods: TempDir,
        opengfd: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Self {
                root: TempDir::new().unwrap(),
                mods: TempDir::new().unwrap(),
                opengfd: TempDir::new().unwrap(),
            };

            let root = fixture.root.path();
            fs::create_dir_all(root.join("p5r-freecam/src")).unwrap();
            fs::create_dir_all(root.join("p5r-freecam/data/Camera")).unwrap();
            fs::write(root.join("p5r-freecam/data/Camera/presets.toml"), "fov = 60").unwrap();
            fs::create_dir_all(root.join("p5rpc.freecam")).unwrap();
            fs::write(
                root.join(ENV_LOCAL_FILE),
                format!("opengfd-path: {}\n", fixture.opengfd.path().display()),
            )
            .unwrap();

            let globals = fixture
                .opengfd
                .path()
                .join("opengfd-globals/middata/ext_xrd744.rs");
            fs::create_dir_all(globals.parent().unwrap()).unwrap();
            fs::write(globals, LOCAL_GLOBALS).unwrap();
            fixture
        }

        fn external(&self) -> HashMap<String, String> {
            HashMap::from([(
                "RELOADEDIIMODS".to_string(),
                self.mods.path().display().to_string(),
            )])
        }

        fn deploy_dir(&self) -> PathBuf {
            self.mods.path().join("p5rpc.freecam")
        }

        fn globals(&self) -> PathBuf {
            self.root.path().join("p5r-freecam/src/globals.rs")
        }
    }

    #[test]
    fn test_local_mode_deploys_everything() {
        let fixture = Fixture::new();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let mut executor = Executor::new(
            fixture.root.path(),
            &["Debug", "false"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap();
        assert_eq!(executor.mode(), Mode::Local);
        let report = executor.execute().unwrap();

        let deploy = fixture.deploy_dir();
        assert_eq!(report.destination, deploy);
        assert_eq!(fs::read_to_string(deploy.join("p5r_freecam.dll")).unwrap(), "release");
        assert!(deploy.join("p5r_freecam.pdb").is_file());
        assert!(deploy.join("p5rpc.freecam.dll").is_file());
        assert_eq!(
            fs::read_to_string(deploy.join("Camera/presets.toml")).unwrap(),
            "fov = 60"
        );

        assert_eq!(fs::read_to_string(fixture.globals()).unwrap(), LOCAL_GLOBALS);
        assert!(fixture.root.path().join("p5r-freecam/riri_hook").is_dir());
        assert!(fetcher.urls.borrow().is_empty());
        assert!(!fixture.root.path().join("Publish").exists());

        assert_eq!(runner.programs(), vec!["cargo", "dotnet"]);
        assert_eq!(
            report.steps.iter().map(|r| r.step).collect::<Vec<_>>(),
            vec![
                Step::AcquireBinding,
                Step::BuildNative,
                Step::BuildManaged,
                Step::StageOutputs
            ]
        );
        assert!(report.steps.iter().all(|r| r.outcome == Outcome::Done));
        assert_eq!(report.bundle, None);
    }

    #[test]
    fn test_debug_toggle_selects_debug_artifacts() {
        let fixture = Fixture::new();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        Executor::new(
            fixture.root.path(),
            &["Debug", "TRUE"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap()
        .execute()
        .unwrap();

        let deploy = fixture.deploy_dir();
        assert_eq!(fs::read_to_string(deploy.join("p5r_freecam.dll")).unwrap(), "debug");
        assert_eq!(runner.calls.borrow()[0].to_string(), "cargo build");
    }

    #[test]
    fn test_publish_mode_stages_and_packages() {
        let fixture = Fixture::new();
        let root = fixture.root.path();
        let stale = root.join("Publish/Builds/CurrentVersion/stale.dll");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);
        let mut executor = Executor::new(
            root,
            &["Publish", "true", "Timings", "true"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap();
        assert_eq!(executor.mode(), Mode::Publish);
        let report = executor.execute().unwrap();

        let config = BuildConfig::default();
        assert_eq!(
            *fetcher.urls.borrow(),
            vec![config.publish.tools_url.clone(), config.binding.url.clone()]
        );
        assert_eq!(fs::read_to_string(fixture.globals()).unwrap(), REMOTE_GLOBALS);

        let build_output = root.join("Publish/Builds/CurrentVersion");
        assert_eq!(report.destination, build_output);
        assert!(!stale.exists());
        assert!(build_output.join("p5r_freecam.dll").is_file());
        assert!(build_output.join("Camera/presets.toml").is_file());
        assert!(build_output.join("p5rpc.freecam.dll").is_file());

        let deploy = fixture.deploy_dir();
        assert!(!deploy.join("p5r_freecam.dll").exists());

        assert_eq!(
            runner.programs(),
            vec!["cargo", "dotnet", "Reloaded.Publisher.exe"]
        );
        let bundle = report.bundle.unwrap();
        assert_eq!(bundle, root.join("Publish/Output"));
        assert_eq!(fs::read_dir(&bundle).unwrap().count(), 1);

        assert_eq!(
            report.steps.iter().map(|r| r.step).collect::<Vec<_>>(),
            vec![
                Step::PublishSetup,
                Step::AcquireBinding,
                Step::BuildNative,
                Step::StageOutputs,
                Step::BuildManaged,
                Step::Finalize
            ]
        );
    }

    #[test]
    fn test_native_failure_stops_pipeline() {
        let fixture = Fixture::new();
        let fetcher = FakeFetcher::default();
        let mut runner = FakeToolchain::new(&fixture);
        runner.fail_native = true;

        let mut executor = Executor::new(
            fixture.root.path(),
            &["Debug", "false"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap();
        let err = executor.execute().unwrap_err();

        assert!(err.to_string().contains("build-native"));
        match err.downcast_ref::<Error>() {
            Some(Error::BuildFailed { diagnostics, .. }) => {
                assert!(diagnostics.contains("unresolved import"))
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(runner.programs(), vec!["cargo"]);
        assert!(!fixture.deploy_dir().exists());
        let last = executor.records().last().unwrap();
        assert_eq!((last.step, last.outcome), (Step::BuildNative, Outcome::Failed));
    }

    #[test]
    fn test_skip_globals_leaves_binding_alone() {
        let fixture = Fixture::new();
        fs::write(fixture.globals(), "// hand edited\n").unwrap();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let report = Executor::new(
            fixture.root.path(),
            &["SkipGlobals", "true"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap()
        .execute()
        .unwrap();

        assert_eq!(
            fs::read_to_string(fixture.globals()).unwrap(),
            "// hand edited\n"
        );
        assert_eq!(report.steps[0].step, Step::AcquireBinding);
        assert_eq!(report.steps[0].outcome, Outcome::Skipped);
    }

    #[test]
    fn test_missing_binding_source_fails_before_build() {
        let fixture = Fixture::new();
        fs::remove_dir_all(fixture.opengfd.path().join("opengfd-globals")).unwrap();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let err = Executor::new(
            fixture.root.path(),
            &["Debug", "false"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .unwrap()
        .execute()
        .unwrap_err();

        assert!(err.to_string().contains("acquire-binding"));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_deploy_variable() {
        let fixture = Fixture::new();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let err = Executor::new(
            fixture.root.path(),
            &["Debug", "false"],
            HashMap::new(),
            &fetcher,
            &runner,
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::MissingVariable(ref name) if name == "RELOADEDIIMODS"));
    }

    #[test]
    fn test_malformed_toggle_reported_first() {
        let fixture = Fixture::new();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let err = Executor::new(
            fixture.root.path(),
            &["Publish", "yes"],
            HashMap::new(),
            &fetcher,
            &runner,
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::InvalidToggle { .. }));
    }

    #[test]
    fn test_missing_local_config() {
        let fixture = Fixture::new();
        fs::remove_file(fixture.root.path().join(ENV_LOCAL_FILE)).unwrap();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let err = Executor::new(
            fixture.root.path(),
            &["Debug", "false"],
            fixture.external(),
            &fetcher,
            &runner,
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::MissingLocalConfig { .. }));
    }

    #[test]
    fn test_project_config_overrides_layout() {
        let fixture = Fixture::new();
        let root = fixture.root.path();
        fs::write(
            root.join(CONFIG_FILE),
            "mod_id = \"p5rpc.other\"\n\n[native]\ndata_dir = \"missing\"\n",
        )
        .unwrap();
        let fetcher = FakeFetcher::default();
        let runner = FakeToolchain::new(&fixture);

        let report = Executor::new(root, &["Debug", "false"], fixture.external(), &fetcher, &runner)
            .unwrap()
            .execute()
            .unwrap();

        let deploy = fixture.mods.path().join("p5rpc.other");
        assert_eq!(report.destination, deploy);
        assert!(deploy.join("p5r_freecam.dll").is_file());
        assert!(!deploy.join("Camera").exists());
    }
}
