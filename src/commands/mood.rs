use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, SyntaxShape, Type};

use super::util::{catalog_flags, names_or_error, recommender_from_input};
use crate::SongrecPlugin;

pub struct MoodCmd;

impl PluginCommand for MoodCmd {
    type Plugin = SongrecPlugin;

    fn name(&self) -> &str {
        "songrec mood"
    }

    fn description(&self) -> &str {
        "List songs tagged with a mood in catalog order"
    }

    fn signature(&self) -> Signature {
        catalog_flags(
            Signature::build(self.name())
                .input_output_types(vec![
                    (Type::table(), Type::List(Box::new(Type::String))),
                    (Type::table(), Type::record()),
                ])
                .required("mood", SyntaxShape::String, "Mood label, e.g. sad, romantic, dark_moody"),
        )
        .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["recommend", "mood", "feeling", "vibe"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![
            Example {
                example: r#"open songs.csv | songrec mood romantic"#,
                description: "Up to 100 romantic songs",
                result: None,
            },
            Example {
                example: r#"open songs.csv | songrec mood dark_moody --limit 10"#,
                description: "First 10 dark, moody songs",
                result: None,
            },
        ]
    }

    fn run(
        &self,
        _plugin: &SongrecPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let mood: String = call.req(0)?;
        let rec = recommender_from_input(call, input)?;
        Ok(names_or_error(rec.recommend_by_mood(&mood), call.head))
    }
}
