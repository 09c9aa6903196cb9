//! Effect-to-UI mapping for navigation effects

use eureka_core::navigation::Effect;

use crate::app::{App, CardView, Cue};

/// Process a navigation effect and update UI state accordingly
pub fn process_effect(app: &mut App, effect: &Effect) {
    match effect {
        Effect::OutgoingCue => {
            app.cue = Cue::Outgoing;
        }

        Effect::Rendered {
            fact,
            position,
            deck_len,
        } => {
            app.card = Some(CardView::Fact {
                fact: fact.clone(),
                position: *position,
                deck_len: *deck_len,
            });
            app.deck_len = *deck_len;
        }

        Effect::IncomingCue => {
            app.cue = Cue::Incoming;
        }

        Effect::TransitionSettled => {
            app.cue = Cue::Settled;
        }

        Effect::EmptyState { category } => {
            app.card = Some(CardView::Empty {
                category: category.clone(),
            });
            app.favorited = false;
        }

        Effect::FavoriteIndicator { favorited, .. } => {
            app.favorited = *favorited;
        }

        Effect::CategoryChanged { category, deck_len } => {
            app.category = category.clone();
            app.deck_len = *deck_len;
            app.cue = Cue::Settled;
            tracing::debug!(%category, deck_len, "category shown");
        }
    }
}
