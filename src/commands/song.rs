use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, SyntaxShape, Type};

use super::util::{catalog_flags, names_or_error, recommender_from_input};
use crate::SongrecPlugin;

pub struct SongCmd;

impl PluginCommand for SongCmd {
    type Plugin = SongrecPlugin;

    fn name(&self) -> &str {
        "songrec song"
    }

    fn description(&self) -> &str {
        "Recommend songs whose lyrics are most similar to the named song"
    }

    fn signature(&self) -> Signature {
        catalog_flags(
            Signature::build(self.name())
                .input_output_types(vec![
                    (Type::table(), Type::List(Box::new(Type::String))),
                    (Type::table(), Type::record()),
                ])
                .required("name", SyntaxShape::String, "Song name (case-insensitive)"),
        )
        .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["recommend", "similar", "song", "lyrics", "tfidf"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![
            Example {
                example: r#"open songs.csv | songrec song "bohemian rhapsody""#,
                description: "Top 100 songs with the most similar lyrics",
                result: None,
            },
            Example {
                example: r#"open songs.csv | songrec song "hello" --limit 10"#,
                description: "Top 10 only",
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
        let name: String = call.req(0)?;
        let rec = recommender_from_input(call, input)?;
        Ok(names_or_error(rec.recommend_by_song(&name), call.head))
    }
}
