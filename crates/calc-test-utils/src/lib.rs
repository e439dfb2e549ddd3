//! Testing utilities for the Calc Studio workspace
//!
//! Shared template fixtures.

#![allow(missing_docs)]

use calc_template::{CalculationTemplate, Difficulty, TemplateParameter};
use chrono::{DateTime, TimeZone, Utc};

/// Ids of the verified templates in [`seismic_catalog`] whose descriptions
/// mention "sísmico"
pub const VERIFIED_SEISMIC_IDS: [&str; 3] = ["struct-01", "struct-04", "geo-02"];

/// Fixed instant `days` days after 2024-01-01
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default()
        + chrono::Duration::days(days)
}

/// Single required number parameter `voltage` in 100..=240
pub fn voltage_template() -> CalculationTemplate {
    CalculationTemplate::new("elec-voltage", "Verificación de tensión", "electrical")
        .with_description("Comprueba la tensión nominal de un circuito")
        .with_parameter(
            TemplateParameter::number("voltage", "Voltage")
                .required()
                .with_bounds(100.0, 240.0)
                .with_unit("V"),
        )
        .verified()
}

/// Template exercising every parameter type
pub fn cable_sizing_template() -> CalculationTemplate {
    CalculationTemplate::new("elec-cable", "Cable sizing", "electrical")
        .with_subcategory("low-voltage")
        .with_tags(["cable", "ampacity"])
        .with_difficulty(Difficulty::Intermediate)
        .with_nec_reference("NEC 310.16")
        .with_parameter(
            TemplateParameter::number("current", "Design current")
                .required()
                .with_min(0.0)
                .with_unit("A"),
        )
        .with_parameter(
            TemplateParameter::number("length", "Run length")
                .with_bounds(1.0, 500.0)
                .with_default(30.0)
                .with_unit("m"),
        )
        .with_parameter(
            TemplateParameter::select("material", "Conductor", ["copper", "aluminum"])
                .required()
                .with_default("copper"),
        )
        .with_parameter(
            TemplateParameter::text("circuit", "Circuit tag")
                .with_pattern("^[A-Z]{2}-[0-9]+$", Some("use a tag like LP-12")),
        )
        .with_parameter(TemplateParameter::boolean("derate", "Apply derating").with_default(false))
        .with_parameter(TemplateParameter::number("section", "Cross-section").output())
        .verified()
}

/// Ten templates: three verified ones mention "sísmico", one unverified one
/// does too, and the rest do not
pub fn seismic_catalog() -> Vec<CalculationTemplate> {
    vec![
        CalculationTemplate::new("struct-01", "Cortante basal", "structural")
            .with_description("Análisis sísmico estático equivalente")
            .with_usage_count(120)
            .with_rating(4.5, 30)
            .with_created_at(day(10))
            .verified(),
        CalculationTemplate::new("struct-02", "Carga de viento", "structural")
            .with_description("Presión de viento sobre fachadas")
            .with_usage_count(300)
            .with_rating(4.1, 12)
            .with_created_at(day(20))
            .verified()
            .trending(),
        CalculationTemplate::new("struct-03", "Deriva de entrepiso", "structural")
            .with_description("Control de deriva SÍSMICO preliminar")
            .with_usage_count(15)
            .with_created_at(day(30)),
        CalculationTemplate::new("struct-04", "Espectro de diseño", "structural")
            .with_subcategory("dynamics")
            .with_description("Espectro sísmico de diseño según zona")
            .with_difficulty(Difficulty::Advanced)
            .with_usage_count(80)
            .with_rating(4.9, 8)
            .with_created_at(day(40))
            .verified()
            .trending(),
        CalculationTemplate::new("elec-01", "Caída de tensión", "electrical")
            .with_description("Caída de tensión en conductores")
            .with_usage_count(500)
            .with_rating(4.7, 90)
            .with_created_at(day(5))
            .verified()
            .favorite(),
        CalculationTemplate::new("elec-02", "Cortocircuito", "electrical")
            .with_description("Corriente de falla trifásica")
            .with_usage_count(45)
            .with_created_at(day(50))
            .verified(),
        CalculationTemplate::new("geo-01", "Capacidad portante", "geotechnical")
            .with_description("Capacidad de carga de cimentaciones superficiales")
            .with_usage_count(60)
            .with_created_at(day(15))
            .verified(),
        CalculationTemplate::new("geo-02", "Licuación de suelos", "geotechnical")
            .with_description("Potencial de licuación bajo sismo; evento sísmico de diseño")
            .with_usage_count(25)
            .with_rating(3.8, 4)
            .with_created_at(day(60))
            .with_last_used_at(day(90))
            .verified(),
        CalculationTemplate::new("hyd-01", "Pérdidas por fricción", "hydraulic")
            .with_description("Darcy-Weisbach para tuberías")
            .with_tags(["tuberías", "flujo"])
            .with_usage_count(70)
            .with_created_at(day(25))
            .verified(),
        CalculationTemplate::new("hyd-02", "Golpe de ariete", "hydraulic")
            .with_description("Sobrepresión transitoria")
            .with_usage_count(5)
            .with_created_at(day(35)),
    ]
}
