pub mod gemini;
pub mod menu;
pub mod rules;

pub use gemini::GeminiService;
pub use menu::MenuService;
pub use rules::RuleTable;
