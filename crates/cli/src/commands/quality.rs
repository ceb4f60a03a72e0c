use bidwise_core::WritingAnalyzer;
use serde_json::json;

use super::CommandResult;

pub fn run(analyzer: &WritingAnalyzer, text: &str, category: Option<&str>) -> CommandResult {
    CommandResult::success(
        "quality",
        json!({
            "category": category,
            "analysis": analyzer.analyze(text, category),
            "hints": analyzer.enhancement_suggestions(text, category),
            "enhanced": analyzer.enhance(text, category),
        }),
    )
}
