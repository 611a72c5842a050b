//! Token-minimal chart summary for prompts.
//!
//! Output looks like
//! `Sun:Capricorn(10deg),Moon:Scorpio(13deg) Asc:Aries(0deg) Fort:Aquarius(3deg)`.

use urania::western::{sign_of, SignPlacement};
use urania::{Chart, PlanetId};

fn token(label: &str, placement: SignPlacement) -> String {
    format!(
        "{}:{}({}deg)",
        label,
        placement.sign,
        placement.degree_in_sign.round() as i64
    )
}

/// Compress a chart into a short, deterministic text.
///
/// Bodies are listed in canonical order; bodies the chart does not carry
/// are skipped.
pub fn compress(chart: &Chart) -> String {
    let mut parts = Vec::with_capacity(3);

    let bodies: Vec<String> = PlanetId::ALL
        .iter()
        .filter_map(|body| {
            chart
                .position(*body)
                .map(|pos| token(body.display_name(), pos.placement()))
        })
        .collect();
    if !bodies.is_empty() {
        parts.push(bodies.join(","));
    }

    parts.push(token("Asc", sign_of(chart.ascendant())));
    parts.push(token("Fort", chart.fortuna().placement()));

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use urania::{compute_chart, FixedPositionProvider};

    async fn chart() -> Chart {
        let provider: FixedPositionProvider = [
            (PlanetId::Sun, 280.37),
            (PlanetId::Moon, 223.32),
            (PlanetId::Mercury, 271.89),
            (PlanetId::Venus, 241.57),
            (PlanetId::Mars, 327.96),
            (PlanetId::Jupiter, 25.25),
            (PlanetId::Saturn, 40.6),
        ]
        .into_iter()
        .collect();
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        compute_chart(&provider, at, 0.0, 0.0).await.unwrap()
    }

    #[tokio::test]
    async fn test_compress_format() {
        let text = compress(&chart().await);
        assert_eq!(
            text,
            "Sun:Capricorn(10deg),Moon:Scorpio(13deg),Mercury:Capricorn(2deg),\
             Venus:Sagittarius(2deg),Mars:Aquarius(28deg),Jupiter:Aries(25deg),\
             Saturn:Taurus(11deg) Asc:Aries(0deg) Fort:Aquarius(3deg)"
        );
    }

    #[tokio::test]
    async fn test_compress_skips_outer_planets() {
        let text = compress(&chart().await);
        assert!(!text.contains("Uranus"));
        assert!(!text.contains("Neptune"));
        assert!(!text.contains("Pluto"));
    }

    #[tokio::test]
    async fn test_compress_is_deterministic() {
        let chart = chart().await;
        assert_eq!(compress(&chart), compress(&chart));
    }
}
