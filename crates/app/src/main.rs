use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use conjugaison_core::model::{ParseTenseError, Tense, TenseSelection};
use services::{
    ChallengeProvider, GeminiProvider, ProviderConfigDraft, SessionLoopService, StaticProvider,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTense(ParseTenseError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTense(err) => write!(f, "invalid --tense value: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    tenses: TenseSelection,
    session_loop: Arc<SessionLoopService>,
}

impl UiApp for DesktopApp {
    fn initial_tenses(&self) -> TenseSelection {
        self.tenses.clone()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}

#[derive(Debug, Default)]
struct Args {
    model: Option<String>,
    tenses: Vec<Tense>,
    offline: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <id>] [--tense <label>]... [--offline]");
    eprintln!();
    eprintln!("Tenses:");
    for tense in Tense::ALL {
        eprintln!("  {tense}");
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CONJUGAISON_API_KEY (or GEMINI_API_KEY), CONJUGAISON_BASE_URL, CONJUGAISON_MODEL");
    eprintln!("  RUST_LOG (default: services=info,ui=info,app=info)");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => parsed.model = Some(require_value(&mut args, "--model")?),
                "--tense" => {
                    let value = require_value(&mut args, "--tense")?;
                    let tense = value.parse().map_err(ArgsError::InvalidTense)?;
                    parsed.tenses.push(tense);
                }
                "--offline" => parsed.offline = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// No `--tense` flag means the default selection.
    fn selection(&self) -> TenseSelection {
        TenseSelection::new(self.tenses.iter().copied()).unwrap_or_default()
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "services=info,ui=info,app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_provider(args: &Args) -> Result<Arc<dyn ChallengeProvider>, Box<dyn std::error::Error>> {
    if args.offline {
        info!("offline mode, serving the built-in challenge");
        return Ok(Arc::new(StaticProvider::default()));
    }

    let mut draft = ProviderConfigDraft::from_env();
    if let Some(model) = args.model.as_deref() {
        draft = draft.with_model(model);
    }
    let provider = GeminiProvider::new(draft.validate()?);
    if provider.enabled() {
        info!(?provider, "challenge generation enabled");
    } else {
        warn!("no API key configured, every round uses the built-in challenge");
    }
    Ok(Arc::new(provider))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let tenses = args.selection();
    let session_loop = Arc::new(SessionLoopService::new(build_provider(&args)?));
    info!(tenses = %tenses.joined_labels(), "starting practice");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        tenses,
        session_loop,
    });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Conjugaison")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn no_flags_selects_present() {
        let args = parse(&[]).unwrap();
        assert!(!args.offline);
        assert_eq!(args.selection(), TenseSelection::default());
    }

    #[test]
    fn repeated_tense_flags_build_selection() {
        let args = parse(&["--tense", "imparfait", "--tense", "Passé Composé", "--offline"]).unwrap();
        assert!(args.offline);
        assert_eq!(
            args.selection().as_slice(),
            [Tense::Imparfait, Tense::PasseCompose]
        );
    }

    #[test]
    fn model_flag_requires_value() {
        assert!(matches!(
            parse(&["--model"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--model" }
        ));
        let args = parse(&["--model", "gemini-2.0-flash"]).unwrap();
        assert_eq!(args.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn unknown_tense_and_args_are_rejected() {
        assert!(matches!(
            parse(&["--tense", "plus-que-parfait"]).unwrap_err(),
            ArgsError::InvalidTense(_)
        ));
        assert!(matches!(
            parse(&["--mood", "subjonctif"]).unwrap_err(),
            ArgsError::UnknownArg(_)
        ));
    }
}
