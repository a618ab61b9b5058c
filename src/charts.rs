// 📈 Chart models - aggregate rows → bar charts
// Pure data: categories, series, labels and colors. Rendering lives in `svg`.

use crate::aggregate::{
    CountryCount, DashboardData, Gender, GenderIndustryCount, IndustryAverage, IndustryCount,
};
use chrono::{DateTime, Utc};
use plotters::style::colors::colormaps::{ColorMap, DerivedColorMap, ViridisRGB};
use plotters::style::RGBColor;
use serde::{Serialize, Serializer};

/// Label shown for rows whose grouping key is NULL.
pub const MISSING_CATEGORY_LABEL: &str = "(none)";

pub const DASHBOARD_TITLE: &str = "Billionaire Statistics Dashboard";

// ============================================================================
// PALETTES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Palette {
    Viridis,
    Set2,
    Coolwarm,
}

/// Diverging blue → red stops, sampled through `DerivedColorMap`.
const COOLWARM: [RGBColor; 6] = [
    RGBColor(0x3b, 0x4c, 0xc0),
    RGBColor(0x7b, 0x9f, 0xf9),
    RGBColor(0xc0, 0xd4, 0xf5),
    RGBColor(0xf2, 0xcb, 0xb7),
    RGBColor(0xee, 0x84, 0x68),
    RGBColor(0xb4, 0x04, 0x26),
];

const SET2: [Rgb; 8] = [
    Rgb(0x66, 0xc2, 0xa5),
    Rgb(0xfc, 0x8d, 0x62),
    Rgb(0x8d, 0xa0, 0xcb),
    Rgb(0xe7, 0x8a, 0xc3),
    Rgb(0xa6, 0xd8, 0x54),
    Rgb(0xff, 0xd9, 0x2f),
    Rgb(0xe5, 0xc4, 0x94),
    Rgb(0xb3, 0xb3, 0xb3),
];

impl Palette {
    /// `n` colors. Continuous palettes are sampled end to end from their
    /// colormap, qualitative ones cycle.
    pub fn colors(&self, n: usize) -> Vec<Rgb> {
        match self {
            Palette::Viridis => sample(&ViridisRGB, n),
            Palette::Coolwarm => sample(&DerivedColorMap::new(&COOLWARM), n),
            Palette::Set2 => (0..n).map(|i| SET2[i % SET2.len()]).collect(),
        }
    }
}

fn sample<M: ColorMap<RGBColor>>(map: &M, n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let t = if n == 1 {
                0.5
            } else {
                i as f32 / (n - 1) as f32
            };
            Rgb::from(map.get_color(t))
        })
        .collect()
}

/// Bar color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<RGBColor> for Rgb {
    fn from(RGBColor(r, g, b): RGBColor) -> Self {
        Rgb(r, g, b)
    }
}

impl From<Rgb> for RGBColor {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        RGBColor(r, g, b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

// ============================================================================
// CHART MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend entry; `None` for single-series charts
    pub name: Option<String>,
    /// One value per category; `None` means no bar
    pub values: Vec<Option<f64>>,
    /// One color per category for single-series charts, one for the whole
    /// series otherwise
    pub colors: Vec<Rgb>,
}

impl Series {
    /// Fill for the bar at `index`.
    pub fn color_at(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).or_else(|| self.colors.first()).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub id: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Decimal places when printing values
    pub value_decimals: usize,
    /// Relative figure height (width is fixed)
    pub height: u32,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.name.is_some())
    }

    /// Largest bar value, 0.0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .copied()
            .fold(0.0, f64::max)
    }
}

/// The four panels in page order (row-major, two per row).
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub total_rows: i64,
    pub generated_at: DateTime<Utc>,
    pub charts: Vec<BarChart>,
}

fn category_label(key: &Option<String>) -> String {
    key.clone()
        .unwrap_or_else(|| MISSING_CATEGORY_LABEL.to_string())
}

fn single_series(categories: &[String], values: Vec<Option<f64>>, palette: Palette) -> Vec<Series> {
    vec![Series {
        name: None,
        values,
        colors: palette.colors(categories.len()),
    }]
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn industry_chart(rows: &[IndustryCount]) -> BarChart {
    let categories: Vec<String> = rows.iter().map(|r| category_label(&r.industry)).collect();
    let values = rows.iter().map(|r| Some(r.billionaire_count as f64)).collect();

    BarChart {
        id: "top-industries",
        title: "Top Industries Producing the Most Billionaires",
        x_label: "Industry",
        y_label: "Number of Billionaires",
        series: single_series(&categories, values, Palette::Viridis),
        categories,
        value_decimals: 0,
        height: 500,
    }
}

/// Grouped bars: industries in order of first appearance (male block first),
/// one series per gender.
pub fn gender_chart(rows: &[GenderIndustryCount]) -> BarChart {
    let mut categories: Vec<String> = Vec::new();
    for row in rows {
        let label = category_label(&row.industry);
        if !categories.contains(&label) {
            categories.push(label);
        }
    }

    let colors = Palette::Set2.colors(Gender::ALL.len());
    let series = Gender::ALL
        .iter()
        .zip(colors)
        .map(|(gender, color)| {
            let values = categories
                .iter()
                .map(|category| {
                    rows.iter()
                        .find(|r| r.gender == *gender && category_label(&r.industry) == *category)
                        .map(|r| r.billionaire_count as f64)
                })
                .collect();

            Series {
                name: Some(gender.label().to_string()),
                values,
                colors: vec![color],
            }
        })
        .collect();

    BarChart {
        id: "gender-by-industry",
        title: "Male vs Female Billionaires by Industry",
        x_label: "Industry",
        y_label: "Number of Billionaires",
        categories,
        series,
        value_decimals: 0,
        height: 500,
    }
}

pub fn country_chart(rows: &[CountryCount]) -> BarChart {
    let categories: Vec<String> = rows.iter().map(|r| category_label(&r.country)).collect();
    let values = rows.iter().map(|r| Some(r.billionaire_count as f64)).collect();

    BarChart {
        id: "top-countries",
        title: "Top 10 Countries with the Most Billionaires",
        x_label: "Country",
        y_label: "Number of Billionaires",
        series: single_series(&categories, values, Palette::Coolwarm),
        categories,
        value_decimals: 0,
        height: 470,
    }
}

pub fn net_worth_chart(rows: &[IndustryAverage]) -> BarChart {
    let categories: Vec<String> = rows.iter().map(|r| category_label(&r.industry)).collect();
    let values = rows.iter().map(|r| r.avg_net_worth).collect();

    BarChart {
        id: "average-net-worth",
        title: "Average Net Worth by Industry",
        x_label: "Industry",
        y_label: "Average Net Worth (in billion USD)",
        series: single_series(&categories, values, Palette::Coolwarm),
        categories,
        value_decimals: 2,
        height: 400,
    }
}

pub fn build_dashboard(data: &DashboardData) -> Dashboard {
    Dashboard {
        title: DASHBOARD_TITLE,
        total_rows: data.total_rows,
        generated_at: data.generated_at,
        charts: vec![
            industry_chart(&data.industry_counts),
            gender_chart(&data.gender_industry_counts),
            country_chart(&data.top_countries),
            net_worth_chart(&data.average_net_worth),
        ],
    }
}
