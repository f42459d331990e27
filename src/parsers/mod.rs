pub mod html;


pub use html::{Anchor, anchors, normalize};
