// # dnsdeploy - single-record DNS deployment CLI
//
// This binary is a THIN integration layer:
// 1. Fold raw command-line tokens into `Options`
// 2. Short-circuit the --help / --regenerate utility paths
// 3. Initialize tracing (--silent keeps errors only)
// 4. Load the configuration file, build the Cloudflare client
// 5. Run the reconciler inside a tokio runtime and map the outcome to an
//    exit code
//
// All decision logic lives in dnsdeploy-core; all HTTP lives in the
// provider crate.

use dnsdeploy_core::{
    regenerate, DeployConfig, Error, Options, Reconciler, Reconciliation, RegenerateOutcome,
    CONFIG_FILE_NAME,
};
use dnsdeploy_provider_cloudflare::CloudflareApi;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different termination scenarios
///
/// - 0: success, including the terminal no-op outcomes
/// - 1: configuration or argument validation error
/// - 2: provider API or transport error
#[derive(Debug, Clone, Copy)]
enum DeployExitCode {
    Success = 0,
    UsageError = 1,
    RuntimeError = 2,
}

impl From<DeployExitCode> for ExitCode {
    fn from(code: DeployExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

const HELP_TEXT: &str = "\
dnsdeploy - create or erase one DNS record on the managed provider

This tool was made to automatically create DNS records for new sites
during deployment.

List of available arguments:
  --zone <alias>     [Required]
      Zone alias defined in the api-access.json file

  --name <subdomain> [Required]
      Record name (bare subdomain or fully qualified)

  --ttl <int>        [Optional, default 1]
      Record time to live in seconds, 1 = automatic

  --type <A|AAAA|CNAME|...> [Optional, default A]
      DNS record type

  --proxied          [Optional, default true]
      Enable provider proxying for the created record

  --erase            [Optional, default false]
      Erase the matching record instead of creating one

  --silent           [Optional, default false]
      Suppress all output except errors

  --help             Print this page and exit

  --regenerate       Create a stub api-access.json if none exists, then exit

Configuration file (api-access.json) structure:
  key     - provider API token
  hosting - address of the hosting machine, used as record content
  zones   - map of zone aliases to provider zone ids
";

fn main() -> ExitCode {
    let options = Options::parse_from(std::env::args().skip(1));

    if options.show_help {
        println!("{}", HELP_TEXT);
        return DeployExitCode::Success.into();
    }

    // --silent keeps errors only; the summary lines below go through info
    let log_level = if options.silent {
        Level::ERROR
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .without_time()
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DeployExitCode::UsageError.into();
    }

    let config_path = Path::new(CONFIG_FILE_NAME);

    if options.regenerate {
        return match regenerate(config_path) {
            Ok(RegenerateOutcome::Created) => {
                info!("new configuration file created: {}", CONFIG_FILE_NAME);
                DeployExitCode::Success.into()
            }
            Ok(RegenerateOutcome::AlreadyExists) => {
                info!(
                    "cannot regenerate configuration file: {} already exists",
                    CONFIG_FILE_NAME
                );
                DeployExitCode::Success.into()
            }
            Err(e) => {
                error!("failed to regenerate configuration file: {}", e);
                DeployExitCode::UsageError.into()
            }
        };
    }

    let config = match DeployConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return DeployExitCode::UsageError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return DeployExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&options, &config)) {
        Ok(()) => DeployExitCode::Success.into(),
        Err(e) => {
            error!("{}", e);
            if e.is_usage_error() {
                DeployExitCode::UsageError.into()
            } else {
                DeployExitCode::RuntimeError.into()
            }
        }
    }
}

/// Validate inputs, reconcile the record, and report the outcome
async fn run(options: &Options, config: &DeployConfig) -> Result<(), Error> {
    let reconciler = Reconciler::new(options, config)?;
    let api = CloudflareApi::new(config.key.clone())?;

    let outcome = reconciler.run(&api).await?;
    let target = reconciler.target_name();

    match outcome {
        Reconciliation::AlreadyExists => {
            info!("deployment succeeded: record already exists: {}", target);
        }
        Reconciliation::NotFoundForErase => {
            info!("erase finished: record does not exist: {}", target);
        }
        Reconciliation::Create(_) => {
            info!("deployment succeeded: created new DNS record: {}", target);
        }
        Reconciliation::Delete { .. } => {
            info!("deployment succeeded: erased DNS record: {}", target);
        }
    }

    Ok(())
}
