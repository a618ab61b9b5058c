// 🖼️ Page - Dashboard → HTML: two rows of two chart panels, each under a subheading.

use crate::charts::{BarChart, Dashboard};
use crate::error::Result;
use crate::svg::{escape, render_chart};

const TEMPLATE: &str = include_str!("../web/index.html");

fn render_panel(chart: &BarChart) -> Result<String> {
    Ok(format!(
        "        <div class=\"panel\">\n            <h3 class=\"subheader\">{}</h3>\n            <div class=\"chart\" id=\"{}\">{}</div>\n        </div>",
        escape(chart.title),
        chart.id,
        render_chart(chart)?
    ))
}

fn render_row(charts: &[BarChart]) -> Result<String> {
    let panels = charts.iter().map(render_panel).collect::<Result<Vec<_>>>()?;
    Ok(panels.join("\n"))
}

/// Replace each `{{key}}` in `template` in one left-to-right pass.
/// Inserted values are never scanned again, and unknown keys are left as is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Full HTML document for the dashboard.
pub fn render_page(dashboard: &Dashboard) -> Result<String> {
    let (first, second) = dashboard.charts.split_at(dashboard.charts.len().min(2));
    let summary = format!(
        "{} billionaires · generated {}",
        dashboard.total_rows,
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let title = escape(dashboard.title);
    let summary = escape(&summary);
    let row_1 = render_row(first)?;
    let row_2 = render_row(second)?;

    Ok(fill_template(
        TEMPLATE,
        &[
            ("title", title.as_str()),
            ("summary", summary.as_str()),
            ("row_1", row_1.as_str()),
            ("row_2", row_2.as_str()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{DashboardData, IndustryCount};
    use crate::charts::build_dashboard;
    use chrono::Utc;

    fn dashboard_with_one_industry() -> Dashboard {
        build_dashboard(&DashboardData {
            industry_counts: vec![IndustryCount {
                industry: Some("Tech".to_string()),
                billionaire_count: 1,
            }],
            gender_industry_counts: Vec::new(),
            top_countries: Vec::new(),
            average_net_worth: Vec::new(),
            total_rows: 1,
            generated_at: Utc::now(),
        })
    }

    #[test]
    fn test_page_has_title_and_four_panels() {
        let html = render_page(&dashboard_with_one_industry()).unwrap();

        assert!(html.contains("<h1 class=\"title\">Billionaire Statistics Dashboard</h1>"));
        assert_eq!(html.matches("class=\"panel\"").count(), 4);
        assert_eq!(html.matches("class=\"chart\"").count(), 4);
        assert_eq!(html.matches("<svg").count(), 4);
        assert_eq!(html.matches("class=\"row\"").count(), 2);
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_subheadings_in_layout_order() {
        let html = render_page(&dashboard_with_one_industry()).unwrap();

        let positions: Vec<usize> = [
            "Top Industries Producing the Most Billionaires",
            "Male vs Female Billionaires by Industry",
            "Top 10 Countries with the Most Billionaires",
            "Average Net Worth by Industry",
        ]
        .iter()
        .map(|heading| html.find(&format!("<h3 class=\"subheader\">{}</h3>", heading)).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_panels_still_render() {
        let html = render_page(&dashboard_with_one_industry()).unwrap();

        // three of the four result tables are empty
        assert_eq!(html.matches("No data").count(), 3);
        assert!(html.contains("1 billionaires"));
    }

    #[test]
    fn test_placeholder_text_in_data_is_not_expanded() {
        let dashboard = build_dashboard(&DashboardData {
            industry_counts: vec![IndustryCount {
                industry: Some("{{row_2}}".to_string()),
                billionaire_count: 1,
            }],
            gender_industry_counts: Vec::new(),
            top_countries: Vec::new(),
            average_net_worth: Vec::new(),
            total_rows: 1,
            generated_at: Utc::now(),
        });

        let html = render_page(&dashboard).unwrap();

        assert_eq!(html.matches("<svg").count(), 4);
        assert_eq!(html.matches("class=\"panel\"").count(), 4);
        assert!(html.contains("{{row_2}}"));
    }

    #[test]
    fn test_fill_template_single_pass() {
        let filled = fill_template(
            "<{{a}}|{{b}}|{{missing}}|{{",
            &[("a", "{{b}}"), ("b", "B")],
        );

        assert_eq!(filled, "<{{b}}|B|{{missing}}|{{");
    }
}
