// FICHIER : jsondb/src/utils/logger.rs

use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

/// Installe le subscriber global (console).
/// `RUST_LOG` est prioritaire ; sinon `default_level` s'applique.
pub fn init_logging(default_level: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let console_layer = fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(env_filter);

        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::warn!("[Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        tracing::debug!("Logger initialisé (niveau par défaut : {})", default_level);
    });
}
