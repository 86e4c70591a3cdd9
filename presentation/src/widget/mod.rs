//! Widget mode: stateless chat through the widget endpoint

mod repl;

pub use repl::WidgetRepl;
