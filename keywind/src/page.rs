use ratatui::{Frame, layout::Rect};

use crate::app::Action;
use crate::config::theme::Theme;
use crate::input::Key;

pub mod menu;
pub mod results;
pub mod typing;

pub use menu::Menu;
pub use results::Results;
pub use typing::Typing;

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        /// A screen on the stack.
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Menu, Typing, Results);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self {
            Self::Menu(page) => page.render(frame, area, theme),
            Self::Typing(page) => page.render(frame, area, theme),
            Self::Results(page) => page.render(frame, area, theme),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        match self {
            Self::Menu(page) => page.handle_key(key),
            Self::Typing(page) => page.handle_key(key),
            Self::Results(page) => page.handle_key(key),
        }
    }
}
