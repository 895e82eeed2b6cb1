//! The stub payload compiled into the binary.
//!
//! This is the static tree copied into every bootstrapped project. The tool
//! treats it as opaque payload: only the files listed in the orchestrator's
//! allow-list (bin/*, README.md, .env.example) get the token-substitution
//! pass afterwards; everything else lands byte-for-byte.

use kickoff_core::domain::{StubFile, StubTree};

const README: &str = r#"# ${PROJECT_NAME}

A Laravel application by ${OWNER}.

## Getting Started

```bash
bin/install
composer run dev
```

## Quality Tooling

```bash
composer run analyse
composer run test
composer run format
```
"#;

const ENV_EXAMPLE: &str = r#"APP_NAME="${PROJECT_NAME}"
APP_ENV=local
APP_KEY=
APP_DEBUG=true
APP_URL=http://localhost

LOG_CHANNEL=stack
LOG_LEVEL=debug

DB_CONNECTION=mysql
DB_HOST=127.0.0.1
DB_PORT=3306
DB_DATABASE=kickoff
DB_USERNAME=root
DB_PASSWORD=

QUEUE_CONNECTION=redis
CACHE_STORE=redis
SESSION_DRIVER=database

REDIS_HOST=127.0.0.1
REDIS_PORT=6379
"#;

const BIN_INSTALL: &str = r#"#!/usr/bin/env bash
# First-time setup for ${PROJECT_NAME}.
set -e

composer install
npm install
php artisan migrate --graceful
php artisan storage:link
"#;

const BIN_DEPLOY: &str = r#"#!/usr/bin/env bash
# Deploy ${PROJECT_NAME} to the current environment.
set -e

php artisan down || true
git pull
composer install --no-dev --optimize-autoloader
npm ci && npm run build
php artisan migrate --force
php artisan config:cache
php artisan up
"#;

const BIN_RELOAD_DB: &str = r#"#!/usr/bin/env bash
# Drop and rebuild the ${PROJECT_NAME} database with seed data.
set -e

php artisan migrate:fresh --seed
"#;

const SUPPORT_HELPERS: &str = r#"<?php

if (! function_exists('require_all_in')) {
    /**
     * Require all files in the given path.
     *
     * @param string $path File path pattern. eg. routes/web/*.php
     */
    function require_all_in(string $path): void
    {
        collect(glob($path))
            ->each(function ($path) {
                if (basename($path) !== basename(__FILE__)) {
                    require $path;
                }
            });
    }
}

// Auto-load all helpers in support/
require_all_in(__DIR__.'/*.php');
"#;

const ROUTES_WEB: &str = r#"<?php

require_all_in(base_path('routes/web/*.php'));
"#;

const ROUTES_WEB_PAGES: &str = r#"<?php

use Illuminate\Support\Facades\Route;

Route::view('/', 'welcome')->name('home');
"#;

const DOCS_README: &str = "# Project Documentation\n\n- Getting Started\n- TOC goes here\n";

const TINKER_GITIGNORE: &str = "*\n!.gitignore\n";

const ARCHITECTURE_TEST: &str = r#"<?php

arch()
    ->expect(['dd', 'dump', 'ray'])
    ->not
    ->toBeUsedIn([
        'app',
        'config',
        'database',
        'routes',
        'support',
    ]);

arch()
    ->expect('App\Http\Controllers')
    ->toHaveSuffix('Controller');

arch()
    ->expect('App\Policies')
    ->toHaveSuffix('Policy');

arch()
    ->expect('env')
    ->toOnlyBeUsedIn([
        'config',
    ]);

arch()
    ->expect('App\Concerns')
    ->toBeTraits();

arch()
    ->expect('App\Contracts')
    ->toBeInterfaces();
"#;

/// Build the builtin payload.
pub fn stub_tree() -> StubTree {
    StubTree::new(vec![
        StubFile::new("README.md", README),
        StubFile::new(".env.example", ENV_EXAMPLE),
        StubFile::executable("bin/install", BIN_INSTALL),
        StubFile::executable("bin/deploy", BIN_DEPLOY),
        StubFile::executable("bin/reload-db", BIN_RELOAD_DB),
        StubFile::new("support/helpers.php", SUPPORT_HELPERS),
        StubFile::new("routes/web.php", ROUTES_WEB),
        StubFile::new("routes/web/pages.php", ROUTES_WEB_PAGES),
        StubFile::new("docs/README.md", DOCS_README),
        StubFile::new("tinker/.gitignore", TINKER_GITIGNORE),
        StubFile::new("tests/Feature/ArchitectureTest.php", ARCHITECTURE_TEST),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::domain::{OWNER_TOKEN, PROJECT_NAME_TOKEN};

    #[test]
    fn payload_is_nonempty() {
        assert!(!stub_tree().is_empty());
    }

    #[test]
    fn branding_targets_carry_tokens() {
        let tree = stub_tree();
        let content = |path: &str| {
            tree.files
                .iter()
                .find(|f| f.path == path)
                .unwrap_or_else(|| panic!("missing stub: {path}"))
                .content
        };

        assert!(content("README.md").contains(PROJECT_NAME_TOKEN));
        assert!(content("README.md").contains(OWNER_TOKEN));
        assert!(content(".env.example").contains(PROJECT_NAME_TOKEN));
        assert!(content(".env.example").contains("DB_DATABASE=kickoff"));
        assert!(content("bin/install").contains(PROJECT_NAME_TOKEN));
    }

    #[test]
    fn bin_scripts_are_flagged_executable() {
        for file in stub_tree().files {
            assert_eq!(
                file.executable,
                file.path.starts_with("bin/"),
                "unexpected exec flag on {}",
                file.path
            );
        }
    }

    #[test]
    fn paths_are_relative_with_forward_slashes() {
        for file in stub_tree().files {
            assert!(!file.path.starts_with('/'), "absolute path: {}", file.path);
            assert!(!file.path.contains('\\'), "backslash in: {}", file.path);
        }
    }
}
