use crate::election::PartyCode;
use crate::style::{interpolate_lab, Rgb};

/// Fill for regions without a usable winner or share.
pub const NEUTRAL_GREY: Rgb = Rgb::hex(0x7f7f7f);

/// Vote share (in percent) at which a party's color reaches full strength.
pub const SATURATION_PERCENTAGE: f64 = 50.0;

/// Choropleth color for a winning party and its vote share in percent (0-100).
///
/// Unknown, missing or blank codes and a share that is not positive (zero, negative
/// or NaN) give `NEUTRAL_GREY`.
/// Otherwise the color runs from white to the party's base color in Lab space,
/// reaching the base color at `SATURATION_PERCENTAGE` and staying there above it.
pub fn color_for(party: Option<&str>, percentage: f64) -> Rgb {
    match party.and_then(PartyCode::parse) {
        Some(party) => party_color(party, percentage),
        None => NEUTRAL_GREY,
    }
}

/// Same as [`color_for`] for an already-parsed code.
pub fn party_color(party: PartyCode, percentage: f64) -> Rgb {
    if percentage <= 0.0 || percentage.is_nan() { return NEUTRAL_GREY }

    let intensity = (percentage / SATURATION_PERCENTAGE).clamp(0.0, 1.0);
    interpolate_lab(Rgb::WHITE, party.base_color(), intensity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Lab;

    #[test]
    fn zero_share_is_grey() {
        for party in PartyCode::ALL {
            assert_eq!(color_for(Some(party.as_str()), 0.0), NEUTRAL_GREY);
        }
    }

    #[test]
    fn missing_or_unknown_code_is_grey() {
        for pct in [0.0, 12.5, 50.0, 100.0] {
            assert_eq!(color_for(None, pct), NEUTRAL_GREY);
            assert_eq!(color_for(Some(""), pct), NEUTRAL_GREY);
            assert_eq!(color_for(Some("LR"), pct), NEUTRAL_GREY);
        }
    }

    #[test]
    fn nan_share_is_grey() {
        assert_eq!(color_for(Some("RN"), f64::NAN), NEUTRAL_GREY);
    }

    #[test]
    fn negative_share_is_grey() {
        assert_eq!(color_for(Some("RN"), -5.0), NEUTRAL_GREY);
        assert_eq!(party_color(PartyCode::Ens, -0.1), NEUTRAL_GREY);
    }

    #[test]
    fn code_lookup_is_case_insensitive() {
        assert_eq!(color_for(Some(" rn "), 42.0), color_for(Some("RN"), 42.0));
    }

    #[test]
    fn saturates_at_fifty_percent() {
        for party in PartyCode::ALL {
            for pct in [50.0, 63.2, 100.0] {
                assert_eq!(party_color(party, pct), party.base_color());
            }
        }
    }

    #[test]
    fn approaches_base_color_monotonically() {
        for party in [PartyCode::Rn, PartyCode::Nfp, PartyCode::Ens, PartyCode::Eco] {
            let base = Lab::from(party.base_color());
            let distances: Vec<f64> = [5.0, 15.0, 25.0, 35.0, 45.0, 50.0].iter()
                .map(|&pct| Lab::from(party_color(party, pct)).distance(&base))
                .collect();
            assert!(distances.windows(2).all(|w| w[1] < w[0]), "{party}: {distances:?}");
        }
    }

    #[test]
    fn worked_example_rn_42() {
        let expected = interpolate_lab(Rgb::WHITE, Rgb::hex(0x004A77), 0.84);
        assert_eq!(color_for(Some("RN"), 42.0), expected);
        assert_ne!(expected, Rgb::hex(0x004A77));
        assert_ne!(expected, Rgb::WHITE);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(color_for(Some("ECO"), 17.3), color_for(Some("ECO"), 17.3));
    }
}
