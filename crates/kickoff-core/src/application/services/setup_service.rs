//! Setup Service - main application orchestrator.
//!
//! This service coordinates the entire bootstrap workflow:
//! 1. Check hard preconditions (the only stop-the-world failures)
//! 2. Copy the stub payload into the project
//! 3. Merge the manifest and brand the generated files
//! 4. Shell out for package installs, vendor publishes, maintenance tasks
//!
//! Everything after the preconditions runs through the step runner:
//! a failing step is reported and the run carries on.

use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::{
    application::{
        ManifestEditor, SetupError, StepRunner,
        ports::{CommandRunner, Filesystem, ProgressReporter},
    },
    domain::{Project, StubSource, substitute_tokens},
    error::KickoffResult,
};

// ── Fixed setup policy ────────────────────────────────────────────────────────

/// Third-party framework add-ons installed into every project.
pub const REQUIRED_PACKAGES: &[&str] = &[
    "spatie/laravel-permission",
    "spatie/laravel-medialibrary",
    "cleaniquecoders/traitify",
    "cleaniquecoders/laravel-media-secure",
    "owen-it/laravel-auditing",
    "yadahan/laravel-authentication-log",
    "lab404/laravel-impersonate",
    "laravel/telescope",
    "laravel/horizon",
    "predis/predis",
    "blade-ui-kit/blade-icons",
    "mallardduck/blade-lucide-icons",
];

/// Development-only tooling.
pub const DEV_PACKAGES: &[&str] = &[
    "barryvdh/laravel-debugbar",
    "larastan/larastan",
    "driftingly/rector-laravel",
    "pestphp/pest-plugin-arch",
];

/// Vendor-publish invocations, one `php artisan vendor:publish` each.
/// A tag that doesn't exist in the installed package version fails that
/// single invocation only.
pub const PUBLISH_TAGS: &[&str] = &[
    "--provider=\"OwenIt\\Auditing\\AuditingServiceProvider\"",
    "--tag=permission-migrations",
    "--tag=permission-config",
    "--tag=medialibrary-migrations",
    "--tag=medialibrary-config",
    "--tag=media-secure-config",
    "--tag=laravel-errors",
    "--tag=authentication-log-migrations",
    "--tag=authentication-log-config",
    "--tag=impersonate",
    "--tag=telescope-migrations",
    "--tag=blade-lucide-icons",
    "--tag=blade-lucide-icons-config",
];

/// Framework maintenance commands run at the end of setup, in order.
pub const MAINTENANCE_COMMANDS: &[&str] = &[
    "bin/install",
    "npm run build",
    "php artisan key:generate",
    "php artisan config:clear",
    "php artisan migrate",
    "php artisan storage:link",
];

/// CI workflow placeholders; tool-owned and regenerated every run.
const WORKFLOW_FILES: &[(&str, &str)] = &[
    (".github/workflows/pint.yml", "name: PHP Linting (Pint)\n"),
    (".github/workflows/phpstan.yml", "name: PHPStan\n"),
    (".github/workflows/rector.yml", "name: Rector CI\n"),
    (".github/workflows/tests.yml", "name: Test\n"),
    (".github/workflows/changelog.yml", "name: Update Changelog\n"),
];

/// Quality-tool configs; created only when absent.
const QUALITY_CONFIGS: &[(&str, &str)] = &[
    ("rector.php", "<?php\n\n// Rector config\n"),
    (
        "phpstan.neon.dist",
        "parameters:\n  level: 6\n  paths:\n    - app/\n",
    ),
    ("pint.json", "{\n    \"preset\": \"laravel\"\n}\n"),
];

/// Documentation templates; created only when absent.
const DOC_TEMPLATES: &[(&str, &str)] = &[
    ("CHANGELOG.md", "# Changelog\n\n## [Unreleased]\n- Initial setup\n"),
    (
        "CONTRIBUTING.md",
        "# Contributing\n\nThanks for contributing! Submit PRs to `main`.\n",
    ),
    (
        "CODE_OF_CONDUCT.md",
        "# Code of Conduct\n\nBe respectful and inclusive.\n",
    ),
    (
        "SECURITY.md",
        "# Security Policy\n\nReport issues to security@example.com\n",
    ),
    ("SUPPORT.md", "# Support\n\nFor help, open an issue.\n"),
];

/// The line the environment step rewrites with the derived database name.
const ENV_DB_PLACEHOLDER: &str = "DB_DATABASE=kickoff";

/// The fixed named-script map written into the manifest.
pub fn default_scripts() -> Map<String, Value> {
    let mut scripts = Map::new();
    scripts.insert(
        "post-autoload-dump".into(),
        json!([
            "Illuminate\\Foundation\\ComposerScripts::postAutoloadDump",
            "@php artisan package:discover --ansi",
        ]),
    );
    scripts.insert(
        "post-update-cmd".into(),
        json!(["@php artisan vendor:publish --tag=laravel-assets --ansi --force"]),
    );
    scripts.insert(
        "post-root-package-install".into(),
        json!(["@php -r \"file_exists('.env') || copy('.env.example', '.env');\""]),
    );
    scripts.insert(
        "post-create-project-cmd".into(),
        json!([
            "@php artisan key:generate --ansi",
            "@php -r \"file_exists('database/database.sqlite') || touch('database/database.sqlite');\"",
            "@php artisan migrate --graceful --ansi",
        ]),
    );
    scripts.insert(
        "dev".into(),
        json!([
            "Composer\\Config::disableProcessTimeout",
            "npx concurrently -c \"#93c5fd,#c4b5fd,#fb7185,#fdba74\" \"php artisan serve\" \"php artisan queue:listen --tries=1\" \"php artisan pail --timeout=0\" \"npm run dev\" --names=server,queue,logs,vite --kill-others",
        ]),
    );
    scripts.insert("analyse".into(), json!("@php vendor/bin/phpstan analyse"));
    scripts.insert("test".into(), json!("@php vendor/bin/pest"));
    scripts.insert(
        "test-arch".into(),
        json!("@php vendor/bin/pest tests/Feature/ArchitectureTest.php"),
    );
    scripts.insert("test-coverage".into(), json!("vendor/bin/pest --coverage"));
    scripts.insert("format".into(), json!("@php vendor/bin/pint"));
    scripts.insert("lint".into(), json!("@php vendor/bin/phplint"));
    scripts.insert("rector".into(), json!("vendor/bin/rector process"));
    scripts
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Result tally of one setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total_steps: usize,
    pub failed_steps: usize,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed_steps == 0
    }
}

/// Main bootstrap service.
///
/// Orchestrates the fixed, strictly linear setup sequence through the three
/// driven ports.
pub struct SetupService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    reporter: Box<dyn ProgressReporter>,
}

impl SetupService {
    /// Create a new setup service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        reporter: Box<dyn ProgressReporter>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            reporter,
        }
    }

    /// Verify the target is a usable project before touching anything.
    ///
    /// Checked in order: path exists, manifest file exists, entry-point file
    /// exists. The first failure aborts the whole run - proceeding without
    /// them would pollute an unrelated directory.
    pub fn check_preconditions(&self, project: &Project) -> KickoffResult<()> {
        if !self.filesystem.exists(project.path()) {
            return Err(SetupError::MissingPath {
                path: project.path().to_path_buf(),
            }
            .into());
        }
        if !self.filesystem.exists(&project.manifest_path()) {
            return Err(SetupError::MissingManifest {
                path: project.manifest_path(),
            }
            .into());
        }
        if !self.filesystem.exists(&project.entrypoint_path()) {
            return Err(SetupError::MissingEntrypoint {
                path: project.entrypoint_path(),
            }
            .into());
        }
        Ok(())
    }

    /// Run the full bootstrap sequence.
    ///
    /// Returns an error only for the hard preconditions; every other failure
    /// is absorbed by the step runner and reflected in the [`RunSummary`].
    #[instrument(skip_all, fields(project = %project.name(), path = %project.path().display()))]
    pub fn run(
        &self,
        project: &Project,
        stubs: &StubSource,
        verbose: bool,
    ) -> KickoffResult<RunSummary> {
        self.check_preconditions(project)?;

        info!(stubs = %stubs.describe(), "setup started");

        let mut steps = StepRunner::new(self.reporter.as_ref());

        steps.run("Copy application stubs", || {
            self.copy_stubs(project, stubs)
        });

        steps.run(
            "Update composer.json for helper, config plugins and scripts",
            || self.configure_manifest(project, verbose),
        );

        steps.run("Update project name in bin/ directory", || {
            self.brand_bin_scripts(project)
        });

        steps.run("Update README", || {
            self.substitute_in_file(project, &project.path().join("README.md"))
        });

        steps.run("Update .env.example", || {
            self.substitute_in_file(project, &project.path().join(".env.example"))
        });

        steps.run("Update project environment file", || {
            self.write_environment_file(project)
        });

        steps.run("Create quality tool configs", || {
            self.ensure_all(project, QUALITY_CONFIGS)
        });

        steps.run("Create documentation templates", || {
            self.ensure_all(project, DOC_TEMPLATES)
        });

        steps.run("Create GitHub Actions workflows", || {
            self.put_workflows(project)
        });

        steps.run("Installing required packages", || {
            self.install_packages(project, verbose)
        });

        steps.run("Publishing package configs & migrations", || {
            self.publish_vendor_tags(project, verbose)
        });

        steps.run("Install tippy.js", || {
            self.runner
                .run("npm install tippy.js", project.path(), verbose)
        });

        steps.run("Building application", || {
            self.run_maintenance_tasks(project, verbose)
        });

        let summary = RunSummary {
            total_steps: steps.total(),
            failed_steps: steps.failed(),
        };

        info!(
            total = summary.total_steps,
            failed = summary.failed_steps,
            "setup finished"
        );

        Ok(summary)
    }

    // ── Steps ─────────────────────────────────────────────────────────────

    /// Mirror the stub payload into the project root (clobber-on-copy: this
    /// happens once, before any manifest or token edits).
    fn copy_stubs(&self, project: &Project, stubs: &StubSource) -> KickoffResult<()> {
        match stubs {
            StubSource::Builtin(tree) => {
                if tree.is_empty() {
                    return Err(SetupError::StubsUnavailable {
                        reason: "builtin stub payload is empty".into(),
                    }
                    .into());
                }
                for file in &tree.files {
                    let dest = project.path().join(file.path);
                    if let Some(parent) = dest.parent() {
                        self.filesystem.ensure_dir(parent)?;
                    }
                    self.filesystem.put_file(&dest, file.content)?;
                    if file.executable {
                        self.filesystem.set_executable(&dest)?;
                    }
                }
                Ok(())
            }
            StubSource::Directory(dir) => {
                if !self.filesystem.exists(dir) {
                    return Err(SetupError::StubsUnavailable {
                        reason: format!("{} does not exist", dir.display()),
                    }
                    .into());
                }
                self.filesystem.copy_tree(dir, project.path())
            }
        }
    }

    /// Merge the three known manifest keys, then refresh the autoloader.
    fn configure_manifest(&self, project: &Project, verbose: bool) -> KickoffResult<()> {
        let editor = ManifestEditor::new(self.filesystem.as_ref());
        editor.update(&project.manifest_path(), |manifest| {
            manifest.set_autoload_files(&["support/helpers.php"]);
            manifest.allow_plugin("pestphp/pest-plugin", true);
            manifest.set_scripts(default_scripts());
        })?;

        self.runner
            .run("composer dump-autoload", project.path(), verbose)
    }

    /// Token-substitute every file under bin/ and re-mark it executable.
    fn brand_bin_scripts(&self, project: &Project) -> KickoffResult<()> {
        let bin_dir = project.path().join("bin");
        for file in self.filesystem.read_dir(&bin_dir)? {
            self.substitute_in_file(project, &file)?;
            self.filesystem.set_executable(&file)?;
        }
        Ok(())
    }

    /// Single-pass token substitution on one allow-listed file.
    fn substitute_in_file(&self, project: &Project, path: &Path) -> KickoffResult<()> {
        let content = self.filesystem.read_file(path)?;
        let branded = substitute_tokens(&content, project);
        if branded != content {
            self.filesystem.put_file(path, &branded)?;
        }
        Ok(())
    }

    /// Materialize .env from its example, injecting the derived database name.
    fn write_environment_file(&self, project: &Project) -> KickoffResult<()> {
        let example = self
            .filesystem
            .read_file(&project.path().join(".env.example"))?;

        let env = example.replace(
            ENV_DB_PLACEHOLDER,
            &format!("DB_DATABASE={}", project.database_name()),
        );

        self.filesystem.put_file(&project.path().join(".env"), &env)
    }

    /// `ensure_file` a batch of (relative path, content) pairs.
    fn ensure_all(&self, project: &Project, files: &[(&str, &str)]) -> KickoffResult<()> {
        for (rel, content) in files {
            self.filesystem
                .ensure_file(&project.path().join(rel), content)?;
        }
        Ok(())
    }

    /// Regenerate the tool-owned CI workflow placeholders.
    fn put_workflows(&self, project: &Project) -> KickoffResult<()> {
        self.filesystem
            .ensure_dir(&project.path().join(".github/workflows"))?;
        for (rel, content) in WORKFLOW_FILES {
            self.filesystem
                .put_file(&project.path().join(rel), content)?;
        }
        Ok(())
    }

    /// Install the fixed required and development package lists.
    ///
    /// Both installs are attempted even if the first fails; the first error
    /// is what the step reports.
    fn install_packages(&self, project: &Project, verbose: bool) -> KickoffResult<()> {
        let required = self.runner.run(
            &format!("composer require {}", REQUIRED_PACKAGES.join(" ")),
            project.path(),
            verbose,
        );
        let dev = self.runner.run(
            &format!("composer require --dev {}", DEV_PACKAGES.join(" ")),
            project.path(),
            verbose,
        );
        required.and(dev)
    }

    /// Publish every vendor tag; a missing tag fails only its own invocation.
    fn publish_vendor_tags(&self, project: &Project, verbose: bool) -> KickoffResult<()> {
        let mut first_err = None;
        for tag in PUBLISH_TAGS {
            let result = self.runner.run(
                &format!("php artisan vendor:publish {tag}"),
                project.path(),
                verbose,
            );
            if let Err(e) = result {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Run the framework maintenance commands; all are attempted.
    fn run_maintenance_tasks(&self, project: &Project, verbose: bool) -> KickoffResult<()> {
        let mut first_err = None;
        for command in MAINTENANCE_COMMANDS {
            if let Err(e) = self.runner.run(command, project.path(), verbose) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockCommandRunner, MockFilesystem};
    use crate::domain::StubTree;
    use crate::error::KickoffError;

    struct NullReporter;

    impl ProgressReporter for NullReporter {
        fn step_started(&self, _description: &str) {}
        fn step_succeeded(&self) {}
        fn step_failed(&self, _error: &KickoffError) {}
    }

    fn project() -> Project {
        Project::new("acme", "Demo App", "/proj").unwrap()
    }

    // ── preconditions ─────────────────────────────────────────────────────

    #[test]
    fn missing_path_short_circuits_before_any_step() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        // Spy contract: no templating and no commands may happen at all.
        fs.expect_put_file().times(0);
        fs.expect_copy_tree().times(0);
        fs.expect_ensure_file().times(0);

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let service = SetupService::new(Box::new(fs), Box::new(runner), Box::new(NullReporter));

        let err = service
            .run(
                &project(),
                &StubSource::Builtin(StubTree::default()),
                false,
            )
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn missing_entrypoint_short_circuits_before_any_step() {
        let mut fs = MockFilesystem::new();
        // Path and manifest exist; artisan does not.
        fs.expect_exists()
            .returning(|p| p != Path::new("/proj/artisan"));
        fs.expect_put_file().times(0);
        fs.expect_copy_tree().times(0);

        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let service = SetupService::new(Box::new(fs), Box::new(runner), Box::new(NullReporter));

        let err = service
            .run(
                &project(),
                &StubSource::Builtin(StubTree::default()),
                false,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            KickoffError::Setup(SetupError::MissingEntrypoint { .. })
        ));
    }

    #[test]
    fn precondition_order_is_path_then_manifest_then_entrypoint() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/proj"));

        let service = SetupService::new(
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            Box::new(NullReporter),
        );

        let err = service.check_preconditions(&project()).unwrap_err();
        assert!(matches!(
            err,
            KickoffError::Setup(SetupError::MissingManifest { .. })
        ));
    }

    // ── fixed policy sanity ───────────────────────────────────────────────

    #[test]
    fn default_scripts_cover_the_known_set() {
        let scripts = default_scripts();
        for key in [
            "post-autoload-dump",
            "post-update-cmd",
            "post-root-package-install",
            "post-create-project-cmd",
            "dev",
            "analyse",
            "test",
            "test-arch",
            "test-coverage",
            "format",
            "lint",
            "rector",
        ] {
            assert!(scripts.contains_key(key), "missing script: {key}");
        }
        assert_eq!(scripts.len(), 12);
    }

    #[test]
    fn package_lists_are_nonempty_and_distinct() {
        assert_eq!(REQUIRED_PACKAGES.len(), 12);
        assert_eq!(DEV_PACKAGES.len(), 4);
        for dev in DEV_PACKAGES {
            assert!(!REQUIRED_PACKAGES.contains(dev));
        }
    }

    #[test]
    fn empty_builtin_payload_fails_the_copy_step_only() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_file().returning(|p| {
            Err(SetupError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to read file: not found".into(),
            }
            .into())
        });
        fs.expect_read_dir().returning(|p| {
            Err(SetupError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to read directory: not found".into(),
            }
            .into())
        });
        fs.expect_ensure_dir().returning(|_| Ok(()));
        fs.expect_ensure_file().returning(|_, _| Ok(()));
        fs.expect_put_file().returning(|_, _| Ok(()));

        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _, _| Ok(()));

        let service = SetupService::new(Box::new(fs), Box::new(runner), Box::new(NullReporter));

        // The empty payload and the unreadable files fail their steps, but
        // the run itself completes with a tally instead of an error.
        let summary = service
            .run(
                &project(),
                &StubSource::Builtin(StubTree::default()),
                false,
            )
            .unwrap();
        assert_eq!(summary.total_steps, 13);
        assert!(summary.failed_steps > 0);
        assert!(summary.failed_steps < summary.total_steps);
    }
}
