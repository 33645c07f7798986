//! The session shell: owns the store and the interaction queue, and
//! drives exactly one render pass per frame.

use crate::actions::{self, Action};
use crate::assets::Assets;
use crate::config::PresentationConfig;
use crate::render;
use crate::store::Store;
use crate::view;
use eframe::egui;
use std::path::Path;

pub struct BriefingApp {
    store: Store,
    config: PresentationConfig,
    assets: Assets,
    /// Interactions captured during the previous pass, applied one at
    /// a time before the next pass renders. Passes never interleave.
    pending: Vec<Action>,
}

impl BriefingApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Store,
        config: PresentationConfig,
        asset_dir: &Path,
    ) -> Self {
        let assets = Assets::load(&cc.egui_ctx, asset_dir);
        Self::with_assets(store, config, assets)
    }

    fn with_assets(
        store: Store,
        config: PresentationConfig,
        assets: Assets,
    ) -> Self {
        Self {
            store,
            config,
            assets,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self) {
        for action in std::mem::take(&mut self.pending) {
            actions::update(&mut self.store, action);
        }
    }
}

impl eframe::App for BriefingApp {
    fn update(
        &mut self,
        ctx: &egui::Context,
        _frame: &mut eframe::Frame,
    ) {
        // Mutations first, so a queued interaction is visible to the
        // very next pass; then one full recomputation of the tree.
        self.flush_pending();
        let tree = render::render(&self.store, &self.config);
        let captured = view::show(ctx, &tree, &self.assets);
        self.pending.extend(captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{RevealState, ToggleAction};

    fn headless_app() -> BriefingApp {
        // No real asset directory: every texture degrades to absent.
        let ctx = egui::Context::default();
        let assets =
            Assets::load(&ctx, Path::new("no_such_dir"));
        BriefingApp::with_assets(
            Store::new(Vec::new()),
            PresentationConfig::default(),
            assets,
        )
    }

    #[test]
    fn test_queued_interactions_apply_before_the_next_pass() {
        let mut app = headless_app();
        app.pending.push(Action::ToggleReveal {
            action: ToggleAction::Reveal,
        });

        assert_eq!(
            app.store.session.reveal(),
            RevealState::Hidden
        );
        app.flush_pending();
        assert_eq!(
            app.store.session.reveal(),
            RevealState::Revealed
        );
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_queue_preserves_arrival_order() {
        let mut app = headless_app();
        app.pending.push(Action::ToggleReveal {
            action: ToggleAction::Reveal,
        });
        app.pending.push(Action::ToggleReveal {
            action: ToggleAction::Reset,
        });

        // Reveal then reset replay in order, landing back on Hidden.
        app.flush_pending();
        assert_eq!(
            app.store.session.reveal(),
            RevealState::Hidden
        );
    }
}
