//! quizlens-report — Report rendering for quizlens.
//!
//! Implements the `TableRenderer` and `ChartSurface` traits from
//! `quizlens-core` for HTML, Markdown, SVG, and Highcharts-style chart
//! configuration output.

pub mod highcharts;
pub mod html;
pub mod markdown;
pub mod svg;

pub use highcharts::HighchartsSurface;
pub use html::{render_page, write_html_report, HtmlRenderer};
pub use markdown::MarkdownRenderer;
pub use svg::SvgChartSurface;
