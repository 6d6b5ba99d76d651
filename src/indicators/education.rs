//! Education layer (IDE): a book pin per area of weighting, colored by the
//! average attainment level of its residents.
//!
//! The table gives four percentage shares, lowest attainment first:
//! - A: no schooling / incomplete primary
//! - B: complete primary / incomplete secondary
//! - C: complete secondary / incomplete higher education
//! - D: complete higher education
//!
//! Shares may use comma decimal separators.

use super::palette::ColorBucket;
use super::{format_optional, Indicator, MarkerStyle};
use crate::config::EducationSource;
use crate::data::{Coordinates, DataLoader, DataProcessor, DecimalStyle, LoaderError, ProcessorError};
use crate::map::{escape_html, MapCanvas};
use crate::stats::StatsCalculator;
use polars::prelude::DataFrame;

/// Column the area name ends up under after loading.
pub const AREA_COLUMN: &str = "Area_Ponderacao";

/// Legend domain for the average level.
pub const LEVEL_RANGE: (f64, f64) = (1.0, 4.0);

const SUMMARIES: [&str; 4] = [
    "🔴 Predomínio de baixa escolaridade — maioria com ensino fundamental incompleto.",
    "🟠 Nível educacional intermediário — predominância de ensino fundamental completo.",
    "🟢 Bom nível educacional — maioria com ensino médio completo.",
    "🟢 Alta escolaridade — grande proporção de moradores com ensino superior completo.",
];
const NO_DATA_SUMMARY: &str = "⚪ Dados educacionais indisponíveis.";

#[derive(Debug, Clone, PartialEq)]
pub struct EducationRecord {
    pub area: String,
    pub neighborhood: Option<String>,
    /// Percentages A..D as read.
    pub shares: [Option<f64>; 4],
    /// Shares as fractions of 1.
    pub fractions: [Option<f64>; 4],
    /// Weighted mean level in [1, 4].
    pub average_level: f64,
    pub location: Coordinates,
}

/// One fixed sentence describing the largest share.
///
/// Ties go to the lower attainment tier.
pub fn summary_text(shares: &[Option<f64>; 4]) -> &'static str {
    let mut dominant: Option<(usize, f64)> = None;
    for (i, share) in shares.iter().enumerate() {
        if let Some(v) = *share {
            if dominant.map_or(true, |(_, best)| v > best) {
                dominant = Some((i, v));
            }
        }
    }
    dominant.map_or(NO_DATA_SUMMARY, |(i, _)| SUMMARIES[i])
}

impl Indicator for EducationRecord {
    type Source = EducationSource;
    type Scale = ();

    fn prepare(loader: &mut DataLoader, source: &EducationSource) -> Result<(), LoaderError> {
        loader.ensure_column(&source.area_column, AREA_COLUMN)
    }

    fn extract(df: &DataFrame, source: &EducationSource) -> Result<Vec<Self>, ProcessorError> {
        let locations = DataProcessor::coordinates(
            df,
            &source.latitude_column,
            &source.longitude_column,
            DecimalStyle::Comma,
        )?;
        let areas = DataProcessor::text_column(df, AREA_COLUMN)?;
        let neighborhoods = DataProcessor::optional_text_column(df, &source.neighborhood_column)?;
        let share_columns = source
            .share_columns
            .iter()
            .map(|name| DataProcessor::optional_numeric_column(df, name, DecimalStyle::Comma))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations
            .into_iter()
            .enumerate()
            .filter_map(|(i, location)| {
                let location = location?;
                let shares: [Option<f64>; 4] = std::array::from_fn(|k| share_columns[k][i]);
                let fractions = StatsCalculator::normalize_shares(&shares);
                let average_level = StatsCalculator::average_level(&fractions)?;
                Some(EducationRecord {
                    area: areas[i].clone().unwrap_or_default(),
                    neighborhood: neighborhoods[i].clone(),
                    shares,
                    fractions,
                    average_level,
                    location,
                })
            })
            .collect())
    }

    fn scale(_records: &[Self]) -> Self::Scale {}

    fn location(&self) -> Coordinates {
        self.location
    }

    fn marker(&self, _scale: &()) -> MarkerStyle {
        MarkerStyle::Icon {
            color: ColorBucket::from_education_level(self.average_level),
            icon: "book",
            icon_color: "white",
        }
    }

    fn popup_html(&self) -> String {
        let neighborhood = self
            .neighborhood
            .as_deref()
            .map(|n| format!("<b>Bairro:</b> {}<br>", escape_html(n)))
            .unwrap_or_default();
        let [a, b, c, d] = self.shares.map(|s| format_optional(s, 2));

        format!(
            "<b>Área de Ponderação:</b> {}<br>\
             {}\
             <b>Média Educacional:</b> {:.2}<br><br>\
             {}<br><br>\
             <small>📊 <b>Distribuição (%):</b><br>\
             A: {} | B: {} | C: {} | D: {}</small>",
            escape_html(&self.area),
            neighborhood,
            self.average_level,
            summary_text(&self.shares),
            a,
            b,
            c,
            d
        )
    }

    fn decorate(canvas: &mut MapCanvas, source: &EducationSource) {
        let (min, max) = LEVEL_RANGE;
        canvas.add_color_legend(min, max, &source.legend_caption);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn source() -> EducationSource {
        EducationSource::default()
    }

    fn table() -> DataFrame {
        let s = source();
        DataFrame::new(vec![
            Column::new(AREA_COLUMN.into(), vec!["Barra", "Pavuna", "Vazia", "Zerada"]),
            Column::new(s.share_columns[0].as_str().into(), vec![Some("10"), Some("55,5"), None, Some("0")]),
            Column::new(s.share_columns[1].as_str().into(), vec![Some("20"), Some("25,5"), None, Some("0")]),
            Column::new(s.share_columns[2].as_str().into(), vec![Some("30"), Some("14"), None, Some("0")]),
            Column::new(s.share_columns[3].as_str().into(), vec![Some("40"), Some("5"), None, Some("0")]),
            Column::new("Latitude (gerada)".into(), vec!["-23,00", "-22,81", "-22,90", "-22,91"]),
            Column::new("Longitude (gerada)".into(), vec!["-43,36", "-43,36", "-43,20", "-43,21"]),
        ])
        .unwrap()
    }

    #[test]
    fn ramp_of_shares_averages_to_three() {
        let records = EducationRecord::extract(&table(), &source()).unwrap();
        let barra = &records[0];
        assert_eq!(barra.area, "Barra");
        assert!((barra.average_level - 3.0).abs() < 1e-9);
        assert_eq!(barra.fractions[3], Some(0.4));
        assert_eq!(
            barra.marker(&()),
            MarkerStyle::Icon {
                color: ColorBucket::VeryHigh,
                icon: "book",
                icon_color: "white"
            }
        );
        assert_eq!(summary_text(&barra.shares), SUMMARIES[3]);
    }

    #[test]
    fn comma_decimals_are_parsed() {
        let records = EducationRecord::extract(&table(), &source()).unwrap();
        let pavuna = &records[1];
        assert_eq!(pavuna.shares[0], Some(55.5));
        assert_eq!(pavuna.location, Coordinates { lat: -22.81, lon: -43.36 });
        // (0.555 + 0.51 + 0.42 + 0.2) / 1.0
        assert!((pavuna.average_level - 1.685).abs() < 1e-9);
        assert_eq!(
            ColorBucket::from_education_level(pavuna.average_level),
            ColorBucket::VeryLow
        );
    }

    #[test]
    fn areas_without_shares_are_skipped() {
        let records = EducationRecord::extract(&table(), &source()).unwrap();
        let areas: Vec<&str> = records.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["Barra", "Pavuna"]);
    }

    #[test]
    fn partially_missing_shares_still_get_a_pin() {
        let s = source();
        let df = DataFrame::new(vec![
            Column::new(AREA_COLUMN.into(), vec!["Lacunar"]),
            Column::new(s.share_columns[0].as_str().into(), vec![None::<&str>]),
            Column::new(s.share_columns[1].as_str().into(), vec![Some("50")]),
            Column::new(s.share_columns[2].as_str().into(), vec![None::<&str>]),
            Column::new(s.share_columns[3].as_str().into(), vec![Some("50")]),
            Column::new("Latitude (gerada)".into(), vec!["-22,95"]),
            Column::new("Longitude (gerada)".into(), vec!["-43,30"]),
        ])
        .unwrap();

        let records = EducationRecord::extract(&df, &s).unwrap();
        assert_eq!(records.len(), 1);
        // (2 * 0.5 + 4 * 0.5) / 1.0
        assert!((records[0].average_level - 3.0).abs() < 1e-9);
        assert!(matches!(
            records[0].marker(&()),
            MarkerStyle::Icon { color: ColorBucket::VeryHigh, .. }
        ));
        assert!(records[0].popup_html().contains("A: n/d | B: 50.00 | C: n/d | D: 50.00"));
    }

    #[test]
    fn summary_picks_largest_share() {
        assert_eq!(summary_text(&[Some(60.0), Some(20.0), Some(10.0), Some(10.0)]), SUMMARIES[0]);
        assert_eq!(summary_text(&[Some(20.0), Some(50.0), Some(20.0), Some(10.0)]), SUMMARIES[1]);
        assert_eq!(summary_text(&[None, Some(10.0), Some(45.0), None]), SUMMARIES[2]);
        assert_eq!(summary_text(&[None; 4]), NO_DATA_SUMMARY);
        assert_eq!(
            summary_text(&[Some(70.0), Some(10.0), Some(10.0), Some(10.0)]),
            "🔴 Predomínio de baixa escolaridade — maioria com ensino fundamental incompleto."
        );
    }

    #[test]
    fn summary_ties_go_to_first_category() {
        assert_eq!(summary_text(&[Some(25.0); 4]), SUMMARIES[0]);
        assert_eq!(summary_text(&[Some(5.0), Some(40.0), Some(40.0), Some(15.0)]), SUMMARIES[1]);
    }

    #[test]
    fn popup_lists_area_summary_and_distribution() {
        let records = EducationRecord::extract(&table(), &source()).unwrap();
        let popup = records[0].popup_html();
        assert!(popup.contains("<b>Área de Ponderação:</b> Barra"));
        assert!(!popup.contains("<b>Bairro:</b>"));
        assert!(popup.contains("<b>Média Educacional:</b> 3.00"));
        assert!(popup.contains(SUMMARIES[3]));
        assert!(popup.contains("A: 10.00 | B: 20.00 | C: 30.00 | D: 40.00"));
    }

    #[test]
    fn legend_spans_levels_one_to_four() {
        let mut canvas = MapCanvas::new(0.0, 0.0, 11);
        EducationRecord::decorate(&mut canvas, &source());
        assert_eq!(canvas.legends.len(), 1);
        assert_eq!((canvas.legends[0].min, canvas.legends[0].max), (1.0, 4.0));
        assert_eq!(canvas.legends[0].caption, "Nível Médio de Educação (IDE)");
    }
}
