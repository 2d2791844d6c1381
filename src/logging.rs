//! Journalisation optionnelle (feature `logging`).
//!
//! Sans la feature, `log_event!` ne produit rien ; les arguments restent
//! vérifiés à la compilation.

#[cfg(feature = "logging")]
macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {
        if false {
            let _ = format!($($arg)+);
        }
    };
}

/// Installe un subscriber `fmt` filtré par `RUST_LOG` (niveau par défaut sinon).
#[cfg(feature = "logging")]
pub fn init_with_level(default_level: &str) {
    use tracing_subscriber::{fmt::Subscriber, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = Subscriber::builder().with_env_filter(filter).try_init();
}
