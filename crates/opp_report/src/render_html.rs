// crates/opp_report/src/render_html.rs
//
// Deterministic, offline HTML for a dashboard snapshot. No external assets;
// every content field is escaped. Section order: insight, branch panel,
// filters, opportunity cards, pagination, map status.

use std::fmt::Write as _;

use crate::model::{BinChip, BranchPanel, DashboardSnapshot, FilterSurface, InsightPanel, MapSummary, OpportunityCard, PageInfo};
use opp_map::MapStatus;

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self { buf: String::with_capacity(16 * 1024) }
    }

    pub fn start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
             <title>{}</title>\
             <style>\
             body{{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px;}}\
             h1,h2,h3{{margin:0.2em 0;}}\
             .muted{{opacity:0.8}}\
             .pill{{display:inline-block;padding:.2em .6em;border-radius:9999px;background:#eee;margin:2px}}\
             .pill.active{{background:#1d4ed8;color:#fff}}\
             .cards{{display:grid;grid-template-columns:repeat(3,minmax(0,1fr));gap:8px}}\
             .card{{border:1px solid #ddd;border-radius:8px;padding:8px}}\
             .card.selected{{border-color:#1d4ed8;box-shadow:0 0 0 2px #1d4ed8}}\
             .success{{color:#15803d}}.warning{{color:#b45309}}.danger{{color:#b91c1c}}\
             .loading{{font-style:italic;opacity:0.7}}\
             </style></head><body>",
            esc(title)
        );
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</body></html>");
        self.buf
    }

    pub fn section_insight(&mut self, p: &InsightPanel) {
        let _ = write!(self.buf, "<section id=\"insight\"><h1>{}</h1>", esc(&p.title));
        if p.is_loading {
            self.buf.push_str("<p class=\"loading\">Analyzing selection…</p>");
        } else {
            let _ = write!(self.buf, "<p>{}</p>", esc(&p.text));
        }
        self.buf.push_str("</section>");
    }

    pub fn section_branch(&mut self, b: &BranchPanel) {
        let _ = write!(
            self.buf,
            "<section id=\"branch\"><h2>{} <span class=\"pill\" data-icon=\"{}\">{}</span></h2>\
             <p>Median income: <b>{}</b><br>Avg travel cost: <b>{}</b></p><div>",
            esc(&b.city),
            esc(b.status_icon),
            esc(b.status),
            esc(&b.median_income),
            esc(&b.avg_travel_cost),
        );
        for c in &b.clusters {
            let _ = write!(self.buf, "<span class=\"pill\">{}</span>", esc(c));
        }
        let _ = write!(self.buf, "</div><p class=\"muted\">{}</p></section>", esc(&b.strategic_actions));
    }

    pub fn section_filters(&mut self, f: &FilterSurface, selected_departments: &[&str]) {
        self.buf.push_str("<section id=\"filters\"><h3>Departments</h3><div>");
        for d in &f.departments {
            let active = selected_departments.contains(&d.as_str());
            let _ = write!(self.buf, "<span class=\"pill{}\">{}</span>", if active { " active" } else { "" }, esc(d));
        }
        self.buf.push_str("</div><h3>Employees</h3><div>");
        self.chips(&f.employee_bins);
        let _ = write!(
            self.buf,
            "</div><h3>Distance{}</h3><div>",
            if f.distance_enabled { "" } else { " <span class=\"muted\">(select a branch)</span>" }
        );
        self.chips(&f.distance_bins);
        self.buf.push_str("</div></section>");
    }

    fn chips(&mut self, chips: &[BinChip]) {
        for c in chips {
            let _ = write!(
                self.buf,
                "<span class=\"pill{}\" data-key=\"{}\">{}</span>",
                if c.active { " active" } else { "" },
                esc(c.key),
                esc(c.label)
            );
        }
    }

    pub fn section_cards(&mut self, cards: &[OpportunityCard]) {
        self.buf.push_str("<section id=\"opportunities\"><div class=\"cards\">");
        for c in cards {
            let _ = write!(
                self.buf,
                "<div class=\"card{}\" data-id=\"{}\"><h3>{}</h3>\
                 <p>{} · {} · {}</p><p>{} · <span class=\"{}\">{}% penetration</span></p></div>",
                if c.selected { " selected" } else { "" },
                esc(&c.id),
                esc(&c.name),
                esc(&c.employees),
                esc(&c.department),
                esc(c.strategic_value),
                esc(&c.distance),
                c.tone.class(),
                c.penetration_percent,
            );
        }
        self.buf.push_str("</div></section>");
    }

    pub fn section_pagination(&mut self, p: &PageInfo) {
        if p.total_pages == 0 {
            return;
        }
        let _ = write!(
            self.buf,
            "<nav id=\"pagination\">Page {} of {} <span class=\"muted\">({} results)</span></nav>",
            p.current_page, p.total_pages, p.total_results
        );
    }

    pub fn section_map(&mut self, m: &MapSummary) {
        match &m.status {
            MapStatus::Failed(msg) => {
                let _ = write!(self.buf, "<section id=\"map\"><p class=\"danger\">Map unavailable: {}</p></section>", esc(msg));
            }
            MapStatus::Ready => {
                let _ = write!(self.buf, "<section id=\"map\"><p class=\"muted\">{} markers on map</p></section>", m.markers);
            }
            MapStatus::Unmounted => {}
        }
    }
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_html(s: &DashboardSnapshot) -> String {
    let mut h = HtmlBuilder::new();
    h.start(&s.insight.title);
    h.section_insight(&s.insight);
    if let Some(b) = &s.branch_panel {
        h.section_branch(b);
    }
    let selected: Vec<&str> = s.criteria.departments.iter().map(String::as_str).collect();
    h.section_filters(&s.filters, &selected);
    h.section_cards(&s.cards);
    h.section_pagination(&s.page);
    if let Some(m) = &s.map {
        h.section_map(m);
    }
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_content() {
        assert_eq!(esc("<a href='x'>&</a>"), "&lt;a href=&#x27;x&#x27;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn cards_and_failed_map() {
        let mut h = HtmlBuilder::new();
        h.section_map(&MapSummary {
            status: MapStatus::Failed("Mapbox token is missing".into()),
            markers: 0,
            reconcile: None,
            camera: None,
        });
        h.section_pagination(&PageInfo { current_page: 1, total_pages: 0, page_size: 6, total_results: 0 });
        let html = h.finish();
        assert!(html.contains("Map unavailable: Mapbox token is missing"));
        assert!(!html.contains("pagination"));
    }
}
