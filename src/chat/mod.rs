pub mod intent;
pub use intent::ChatIntent;

pub mod reducer;
pub use reducer::ChatReducer;

pub mod render;
pub use render::{ErrorBanner, TranscriptFollower};

pub mod state;
pub use state::{ChatModel, Message, Role, Session, UnansweredTurnPolicy};

mod view;
pub use view::ChatView;
