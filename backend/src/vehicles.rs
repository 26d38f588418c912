use crate::error::PlanError;
use crate::models::{VehicleListing, VehicleProfile};

pub const CUSTOM_MODEL_ID: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleModel {
    pub id: &'static str,
    pub manufacturer: &'static str,
    pub name: &'static str,
    pub range_miles: f64,
}

const fn model(
    id: &'static str,
    manufacturer: &'static str,
    name: &'static str,
    range_miles: f64,
) -> VehicleModel {
    VehicleModel {
        id,
        manufacturer,
        name,
        range_miles,
    }
}

/// Rated (EPA) range per model. `chevy_bolt` is the id older clients send
/// for the Bolt EV.
static VEHICLE_MODELS: &[VehicleModel] = &[
    model("tesla_model_3", "Tesla", "Model 3", 272.0),
    model("tesla_model_y", "Tesla", "Model Y", 310.0),
    model("tesla_model_s", "Tesla", "Model S", 405.0),
    model("tesla_model_x", "Tesla", "Model X", 348.0),
    model("tesla_cybertruck", "Tesla", "Cybertruck", 340.0),
    model("chevy_bolt_ev", "Chevrolet", "Bolt EV", 259.0),
    model("chevy_bolt", "Chevrolet", "Bolt", 259.0),
    model("chevy_bolt_euv", "Chevrolet", "Bolt EUV", 247.0),
    model("chevy_blazer_ev", "Chevrolet", "Blazer EV", 279.0),
    model("chevy_silverado_ev", "Chevrolet", "Silverado EV", 450.0),
    model("chevy_equinox_ev", "Chevrolet", "Equinox EV", 319.0),
    model("ford_mach_e", "Ford", "Mustang Mach-E", 290.0),
    model("ford_f150_lightning", "Ford", "F-150 Lightning", 320.0),
    model("ford_e_transit", "Ford", "E-Transit", 126.0),
    model("hyundai_ioniq5", "Hyundai", "IONIQ 5", 303.0),
    model("hyundai_ioniq6", "Hyundai", "IONIQ 6", 361.0),
    model("hyundai_kona_ev", "Hyundai", "Kona Electric", 261.0),
    model("kia_ev6", "Kia", "EV6", 310.0),
    model("kia_niro_ev", "Kia", "Niro EV", 253.0),
    model("kia_ev9", "Kia", "EV9", 304.0),
    model("vw_id4", "Volkswagen", "ID.4", 275.0),
    model("vw_id_buzz", "Volkswagen", "ID. Buzz", 234.0),
    model("nissan_leaf", "Nissan", "Leaf", 212.0),
    model("nissan_ariya", "Nissan", "Ariya", 304.0),
    model("bmw_i4", "BMW", "i4", 301.0),
    model("bmw_i7", "BMW", "i7", 318.0),
    model("bmw_ix", "BMW", "iX", 324.0),
    model("bmw_i5", "BMW", "i5", 295.0),
    model("audi_etron", "Audi", "e-tron", 222.0),
    model("audi_etron_gt", "Audi", "e-tron GT", 249.0),
    model("audi_q4_etron", "Audi", "Q4 e-tron", 265.0),
    model("audi_q8_etron", "Audi", "Q8 e-tron", 285.0),
    model("mercedes_eqs", "Mercedes-Benz", "EQS", 350.0),
    model("mercedes_eqe", "Mercedes-Benz", "EQE", 305.0),
    model("mercedes_eqb", "Mercedes-Benz", "EQB", 245.0),
    model("mercedes_eqa", "Mercedes-Benz", "EQA", 250.0),
    model("lucid_air", "Lucid", "Air", 516.0),
    model("rivian_r1t", "Rivian", "R1T", 328.0),
    model("rivian_r1s", "Rivian", "R1S", 321.0),
    model("polestar_2", "Polestar", "Polestar 2", 270.0),
    model("polestar_3", "Polestar", "Polestar 3", 315.0),
    model("volvo_c40", "Volvo", "C40 Recharge", 257.0),
    model("volvo_xc40", "Volvo", "XC40 Recharge", 254.0),
    model("volvo_ex30", "Volvo", "EX30", 275.0),
    model("volvo_ex90", "Volvo", "EX90", 310.0),
];

pub fn all_models() -> &'static [VehicleModel] {
    VEHICLE_MODELS
}

pub fn lookup(model_id: &str) -> Option<&'static VehicleModel> {
    VEHICLE_MODELS.iter().find(|m| m.id == model_id)
}

pub fn listings() -> Vec<VehicleListing> {
    VEHICLE_MODELS
        .iter()
        .map(|m| VehicleListing {
            id: m.id.to_string(),
            manufacturer: m.manufacturer.to_string(),
            name: m.name.to_string(),
            range_miles: m.range_miles,
        })
        .collect()
}

/// Human readable name, e.g. "Tesla Model 3" or "Custom Range".
pub fn display_name(model_id: &str) -> String {
    match lookup(model_id) {
        Some(m) => format!("{} {}", m.manufacturer, m.name),
        None if model_id == CUSTOM_MODEL_ID => "Custom Range".to_string(),
        None => model_id.to_string(),
    }
}

pub fn validate_range(range_miles: f64) -> Result<f64, PlanError> {
    if range_miles.is_finite() && range_miles > 0.0 {
        Ok(range_miles)
    } else {
        Err(PlanError::InvalidRange(range_miles))
    }
}

/// Resolve the range used for planning. A user supplied range always wins
/// over the table, and `"custom"` requires one.
pub fn resolve_profile(
    model_id: &str,
    custom_range_miles: Option<f64>,
) -> Result<VehicleProfile, PlanError> {
    let model_id = model_id.trim();
    if model_id.is_empty() {
        return Err(PlanError::MissingVehicle);
    }

    let range_miles = match (custom_range_miles, lookup(model_id)) {
        (Some(custom), _) => validate_range(custom)?,
        (None, _) if model_id == CUSTOM_MODEL_ID => return Err(PlanError::MissingCustomRange),
        (None, Some(known)) => known.range_miles,
        (None, None) => return Err(PlanError::UnknownVehicle(model_id.to_string())),
    };

    Ok(VehicleProfile {
        model_id: model_id.to_string(),
        range_miles,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_model_resolves_to_table_range() {
        let profile = resolve_profile("tesla_model_3", None).unwrap();
        assert_eq!(profile.range_miles, 272.0);
        assert_eq!(profile.model_id, "tesla_model_3");
    }

    #[test]
    fn custom_requires_a_range() {
        assert!(matches!(
            resolve_profile("custom", None),
            Err(PlanError::MissingCustomRange)
        ));
        let profile = resolve_profile("custom", Some(180.0)).unwrap();
        assert_eq!(profile.range_miles, 180.0);
    }

    #[test]
    fn custom_range_overrides_table() {
        let profile = resolve_profile("nissan_leaf", Some(150.0)).unwrap();
        assert_eq!(profile.range_miles, 150.0);
    }

    #[test]
    fn unknown_and_missing_models_are_rejected() {
        assert!(matches!(
            resolve_profile("flux_capacitor", None),
            Err(PlanError::UnknownVehicle(id)) if id == "flux_capacitor"
        ));
        assert!(matches!(
            resolve_profile("  ", None),
            Err(PlanError::MissingVehicle)
        ));
    }

    #[test]
    fn non_positive_ranges_are_rejected() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resolve_profile("custom", Some(bad)),
                Err(PlanError::InvalidRange(_))
            ));
        }
    }

    #[test]
    fn table_is_well_formed() {
        let ids: HashSet<_> = all_models().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), all_models().len(), "model ids must be unique");
        assert!(all_models().len() >= 44);
        assert!(!ids.contains(CUSTOM_MODEL_ID));
        assert!(all_models().iter().all(|m| m.range_miles > 0.0));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("kia_ev6"), "Kia EV6");
        assert_eq!(display_name("custom"), "Custom Range");
        assert_eq!(listings().len(), all_models().len());
    }
}
