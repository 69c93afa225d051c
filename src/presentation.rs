//! Presentation seam
//!
//! The controller only emits [`DisplayCommand`]s. [`ViewPresenter`] folds them
//! into a serializable [`View`] that the page renders.

use serde::{Deserialize, Serialize};

use crate::game::ShareIntent;

pub const IDLE_MESSAGE: &str = "Click <strong>Start</strong> to test your reaction time.";
pub const EARLY_MESSAGE: &str = "Too early! Wait for the color to turn green before clicking.";

/// Display update requested by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DisplayCommand {
    ShowIdle,
    ShowWaiting,
    ShowReady,
    ShowResult { reaction_time_ms: u64 },
    ShowEarly,
    OpenShareIntent(ShareIntent),
}

/// Receives display commands from the controller
pub trait Presentation {
    fn display(&mut self, command: DisplayCommand);
}

/// Background indicator of the play surface. The page picks the actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Neutral,
    Armed,
    Go,
}

/// Everything the page needs to draw the current screen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct View {
    /// Incremented on every display command
    pub revision: u64,
    pub overlay_visible: bool,
    pub message: String,
    pub background: Background,
    pub result_visible: bool,
    pub reaction_time_ms: Option<u64>,
    /// Set by the latest share request, cleared when the game returns to idle
    pub share: Option<ShareIntent>,
}

/// Presentation adapter accumulating commands into a [`View`]
#[derive(Debug, Clone, Default)]
pub struct ViewPresenter {
    view: View,
}

impl ViewPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }
}

impl Presentation for ViewPresenter {
    fn display(&mut self, command: DisplayCommand) {
        let view = &mut self.view;
        view.revision += 1;

        match command {
            DisplayCommand::ShowIdle => {
                view.overlay_visible = true;
                view.result_visible = false;
                view.background = Background::Neutral;
                view.message = IDLE_MESSAGE.to_string();
                view.reaction_time_ms = None;
                view.share = None;
            }
            DisplayCommand::ShowWaiting => {
                view.overlay_visible = false;
                view.result_visible = false;
                view.background = Background::Armed;
            }
            DisplayCommand::ShowReady => {
                view.background = Background::Go;
            }
            DisplayCommand::ShowResult { reaction_time_ms } => {
                view.result_visible = true;
                view.reaction_time_ms = Some(reaction_time_ms);
                view.background = Background::Neutral;
            }
            DisplayCommand::ShowEarly => {
                view.overlay_visible = true;
                view.message = EARLY_MESSAGE.to_string();
            }
            DisplayCommand::OpenShareIntent(intent) => {
                view.share = Some(intent);
            }
        }
    }
}
