//! Two-state machine gating the synthetic illicit-market row.

/// Visibility of the illicit-market entry in the commodity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

/// User-triggered transitions of the reveal toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Reveal,
    Reset,
}

impl RevealState {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            RevealState::Revealed
        } else {
            RevealState::Hidden
        }
    }

    pub fn flag(self) -> bool {
        self == RevealState::Revealed
    }

    /// Attempt a transition. `Reveal` is only permitted from `Hidden`,
    /// `Reset` only from `Revealed`; any other attempt is rejected and
    /// returns `None` so the caller leaves the store untouched.
    pub fn transition(
        self,
        action: ToggleAction,
    ) -> Option<RevealState> {
        match (self, action) {
            (RevealState::Hidden, ToggleAction::Reveal) => {
                Some(RevealState::Revealed)
            }
            (RevealState::Revealed, ToggleAction::Reset) => {
                Some(RevealState::Hidden)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_then_reset_round_trip() {
        let hidden = RevealState::Hidden;

        let revealed = hidden
            .transition(ToggleAction::Reveal)
            .expect("reveal from Hidden must be permitted");
        assert_eq!(revealed, RevealState::Revealed);

        let back = revealed
            .transition(ToggleAction::Reset)
            .expect("reset from Revealed must be permitted");
        assert_eq!(back, RevealState::Hidden);
    }

    #[test]
    fn test_repeated_reveal_is_rejected() {
        let revealed = RevealState::Hidden
            .transition(ToggleAction::Reveal)
            .unwrap();

        // Second attempt from Revealed is a no-op, not an error.
        assert_eq!(
            revealed.transition(ToggleAction::Reveal),
            None,
            "reveal while already Revealed must be rejected"
        );
    }

    #[test]
    fn test_reset_while_hidden_is_rejected() {
        assert_eq!(
            RevealState::Hidden.transition(ToggleAction::Reset),
            None
        );
    }

    #[test]
    fn test_flag_round_trip() {
        assert!(RevealState::from_flag(true).flag());
        assert!(!RevealState::from_flag(false).flag());
        assert_eq!(RevealState::from_flag(false), RevealState::Hidden);
    }
}
