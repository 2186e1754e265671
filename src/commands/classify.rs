use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{
    Category, Example, LabeledError, ListStream, PipelineData, Signature, Signals, SyntaxShape,
    Type, Value,
};

use super::util::{append_column, cell_text};
use crate::algo::mood;
use crate::SongrecPlugin;

pub struct Classify;

impl PluginCommand for Classify {
    type Plugin = SongrecPlugin;

    fn name(&self) -> &str {
        "songrec classify"
    }

    fn description(&self) -> &str {
        "Tag each row with a mood label from keywords in its lyrics"
    }

    fn signature(&self) -> Signature {
        Signature::build(self.name())
            .input_output_type(Type::table(), Type::table())
            .named(
                "field",
                SyntaxShape::String,
                "Field containing lyrics (default: text)",
                Some('f'),
            )
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["mood", "classify", "tag", "lyrics", "sentiment"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![Example {
            example: r#"[[text]; ["I cry alone at night"] ["we dance and party"]] | songrec classify"#,
            description: "Adds a _mood column: sad, energetic_hype",
            result: None,
        }]
    }

    fn run(
        &self,
        _plugin: &SongrecPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let field: String = call
            .get_flag::<String>("field")?
            .unwrap_or_else(|| "text".into());
        let head = call.head;
        let classifier = mood::default_classifier();

        let rows: Vec<Value> = input.into_iter().collect();
        if rows.is_empty() {
            return Ok(PipelineData::Value(Value::list(vec![], head), None));
        }

        let results: Vec<Value> = rows
            .into_iter()
            .map(|row| {
                let label = classifier.classify(&cell_text(&row, &field)).to_string();
                append_column(row, "_mood", Value::string(label, head), head)
            })
            .collect();

        Ok(ListStream::new(results.into_iter(), head, Signals::empty()).into())
    }
}
