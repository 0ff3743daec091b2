use planilla_core::error::PlanillaError;
use planilla_core::model::Extraction;

pub fn print(extraction: &Extraction) -> Result<(), PlanillaError> {
    let json = serde_json::to_string_pretty(extraction)?;
    println!("{json}");
    Ok(())
}
