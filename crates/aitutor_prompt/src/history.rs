//! Conversation history replay.

use aitutor_core::{Exchange, Turn};

/// Converts stored exchanges into the turns that prime a session.
///
/// Each exchange yields a `user` turn followed by a `model` turn, in the order
/// supplied. Structured responses are replayed as compact JSON text.
///
/// # Examples
///
/// ```
/// use aitutor_core::{Exchange, Role};
/// use aitutor_prompt::to_turns;
///
/// let turns = to_turns(&[Exchange::new("Hi", "Hello! What shall we study?")]);
/// assert_eq!(turns.len(), 2);
/// assert_eq!(*turns[0].role(), Role::User);
/// assert_eq!(*turns[1].role(), Role::Model);
/// ```
pub fn to_turns(exchanges: &[Exchange]) -> Vec<Turn> {
    exchanges
        .iter()
        .flat_map(|exchange| {
            [
                Turn::user(exchange.prompt().as_str()),
                Turn::model(exchange.response_text()),
            ]
        })
        .collect()
}
