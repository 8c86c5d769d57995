//! Motion and timing engine for a touch-driven trail effect.
//!
//! A tap picks a target; a trail of elements follows it with staggered start
//! times while a shared rotation spins once per gesture. A collapsible speed
//! control sets the animation duration and hides itself after use.
//!
//! Nothing here touches a window, GPU or audio API. Front-ends feed
//! [`InputEvent`]s into a [`MotionSession`], call [`MotionSession::tick`] once
//! per frame and draw the resulting [`FrameSnapshot`].

pub mod animator;
pub mod clock;
pub mod constants;
pub mod easing;
pub mod error;
pub mod frame;
pub mod palette;
pub mod params;
pub mod session;
pub mod slider;
pub mod speed;
pub mod trail;
pub mod tween;

pub use animator::*;
pub use clock::*;
pub use constants::*;
pub use easing::*;
pub use error::MotionError;
pub use frame::*;
pub use palette::*;
pub use params::*;
pub use session::*;
pub use slider::*;
pub use speed::*;
pub use trail::*;
pub use tween::*;
