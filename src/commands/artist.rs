use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, SyntaxShape, Type};

use super::util::{catalog_flags, names_or_error, recommender_from_input};
use crate::SongrecPlugin;

pub struct ArtistCmd;

impl PluginCommand for ArtistCmd {
    type Plugin = SongrecPlugin;

    fn name(&self) -> &str {
        "songrec artist"
    }

    fn description(&self) -> &str {
        "List songs by an artist in catalog order"
    }

    fn signature(&self) -> Signature {
        catalog_flags(
            Signature::build(self.name())
                .input_output_types(vec![
                    (Type::table(), Type::List(Box::new(Type::String))),
                    (Type::table(), Type::record()),
                ])
                .required("artist", SyntaxShape::String, "Artist name (case-insensitive)"),
        )
        .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["recommend", "artist", "songs", "band"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![
            Example {
                example: r#"open songs.csv | songrec artist "queen""#,
                description: "Up to 100 songs by Queen",
                result: None,
            },
            Example {
                example: r#"open songs.csv | songrec artist "adele" --limit 10"#,
                description: "First 10 songs by Adele",
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
        let artist: String = call.req(0)?;
        let rec = recommender_from_input(call, input)?;
        Ok(names_or_error(rec.recommend_by_artist(&artist), call.head))
    }
}
