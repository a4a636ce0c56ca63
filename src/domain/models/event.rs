use tui_textarea::Input;

use super::CompletionError;
use super::TurnContent;

pub enum Event {
    CompletionSettled(Result<TurnContent, CompletionError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
