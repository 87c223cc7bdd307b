// ============================================================================
// Décorateur SlowLog : mesure du temps de rendu des lignes
// ============================================================================
// PATTERN : Decorator
// - SlowLog<R> enveloppe n'importe quel RowRenderer
// - Chaque rendu est exécuté dans un span tracing
// - Au-delà du seuil : warning ; sinon : trace
//
// Ajouté explicitement au point de composition (main.rs) si la config
// l'active. Le composant lui-même ne s'instrumente pas.
// ============================================================================

use std::time::{Duration, Instant};

use tracing::{trace, trace_span, warn};

use crate::error::RowResult;
use crate::row::props::WalletRowProps;
use crate::row::view::{RowRenderer, WalletRowView};

/// Seuil par défaut au-delà duquel un rendu est jugé lent
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(16);

/// Enveloppe un renderer et logge les rendus lents
#[derive(Debug, Clone)]
pub struct SlowLog<R> {
    inner: R,
    threshold: Duration,
}

impl<R: RowRenderer> SlowLog<R> {
    /// Enveloppe `inner` avec un seuil donné
    pub fn new(inner: R, threshold: Duration) -> Self {
        Self { inner, threshold }
    }

    /// Seuil courant
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Renderer enveloppé
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: RowRenderer> RowRenderer for SlowLog<R> {
    fn render_row(&self, props: &WalletRowProps<'_>) -> RowResult<Option<WalletRowView>> {
        let span = trace_span!("render_row", wallet_id = %props.wallet.id);
        let _guard = span.enter();

        let started = Instant::now();
        let result = self.inner.render_row(props);
        let elapsed = started.elapsed();

        if elapsed > self.threshold {
            warn!(
                elapsed_us = elapsed.as_micros() as u64,
                threshold_us = self.threshold.as_micros() as u64,
                "Slow wallet row render"
            );
        } else {
            trace!(elapsed_us = elapsed.as_micros() as u64, "Wallet row rendered");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Denomination, Wallet};
    use crate::row::props::{map_state_to_props, WalletRowOwnProps};
    use crate::row::view::WalletRowComponent;
    use crate::state::StateSnapshot;
    use std::cell::Cell;

    /// Renderer de test : compte les appels, attend un peu
    struct CountingRenderer {
        calls: Cell<usize>,
        delay: Duration,
    }

    impl RowRenderer for CountingRenderer {
        fn render_row(&self, _props: &WalletRowProps<'_>) -> RowResult<Option<WalletRowView>> {
            self.calls.set(self.calls.get() + 1);
            std::thread::sleep(self.delay);
            Ok(None)
        }
    }

    #[test]
    fn test_slowlog_is_transparent() {
        let wallet = Wallet::new("w", "BTC", "Bitcoin", "100000000")
            .with_denomination("BTC", Denomination::new("BTC", "100000000", Some("₿")));
        let state = StateSnapshot::default();
        let props = map_state_to_props(&state, WalletRowOwnProps { wallet: &wallet });

        let plain = WalletRowComponent::default().render_row(&props);
        let traced = SlowLog::new(WalletRowComponent::default(), DEFAULT_SLOW_THRESHOLD).render_row(&props);
        assert_eq!(plain, traced);
    }

    #[test]
    fn test_slowlog_calls_inner_once_even_when_slow() {
        let wallet = Wallet::new("w", "BTC", "Bitcoin", "1");
        let state = StateSnapshot::default();
        let props = map_state_to_props(&state, WalletRowOwnProps { wallet: &wallet });

        let slow = SlowLog::new(
            CountingRenderer {
                calls: Cell::new(0),
                delay: Duration::from_millis(5),
            },
            Duration::from_millis(1),
        );

        assert_eq!(slow.render_row(&props), Ok(None));
        assert_eq!(slow.inner().calls.get(), 1);
        assert_eq!(slow.threshold(), Duration::from_millis(1));
    }
}
