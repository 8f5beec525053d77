use paylens_core::fields::mask_card;

use crate::OutputFormat;

pub(crate) fn cmd_mask(card: &str, output: OutputFormat) {
    let masked = mask_card(card);
    match output {
        OutputFormat::Text => println!("{}", masked),
        OutputFormat::Json => println!("{}", serde_json::json!({ "masked": masked })),
    }
}
