//! Single-string annotation command.

use tokio::io::AsyncReadExt;

use nsrtag::config::{AnnotationConfig, Config};
use nsrtag::models::RecordUpdate;
use nsrtag::KeywordAnnotator;

/// Annotate one keyword string and print the three derived fields as JSON.
pub async fn cmd_annotate(
    config: &Config,
    text: Option<String>,
    pretty: bool,
    no_bare: bool,
) -> anyhow::Result<()> {
    let annotation_config = AnnotationConfig {
        bare_mass_numbers: config.annotation.bare_mass_numbers && !no_bare,
    };
    let annotator = KeywordAnnotator::from_config(&annotation_config)?;

    let text = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let result = annotator.annotate(Some(text.trim_end_matches(['\r', '\n'])));
    let update = RecordUpdate::from_result(serde_json::Value::Null, result);
    let output = serde_json::json!({
        "nuclides": update.nuclides,
        "reactions": update.reactions,
        "z_values": update.z_values,
    });

    if pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}
