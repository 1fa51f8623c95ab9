//! Greeting tools.
//!
//! - `say_hello`: a fixed welcome message
//! - `get_greeting_info`: service metadata
//! - `create_custom_greeting`: friendly / formal / casual greetings, optionally time-aware
//! - `list_available_greetings`: the supported greeting styles

pub mod custom_greeting;
pub mod greeting_info;
pub mod list_greetings;
pub mod say_hello;

pub use custom_greeting::CreateCustomGreetingTool;
pub use greeting_info::GetGreetingInfoTool;
pub use list_greetings::ListAvailableGreetingsTool;
pub use say_hello::SayHelloTool;

/// Supported greeting styles, in display order.
pub const GREETING_TYPES: [&str; 3] = ["friendly", "formal", "casual"];

/// The style used when an unknown one is requested.
pub const DEFAULT_GREETING_TYPE: &str = "friendly";

/// Greeting pattern for a style, with `{name}` as the placeholder.
pub fn greeting_template(greeting_type: &str) -> Option<&'static str> {
    match greeting_type {
        "friendly" => Some("Hey there, {name}! Great to see you!"),
        "formal" => Some("Good day, {name}. How may I assist you?"),
        "casual" => Some("What's up, {name}!"),
        _ => None,
    }
}
