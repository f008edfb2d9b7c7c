// Renders the WordPress page body: update timestamp, trend table, rebased
// chart, and the overheated-and-rising ranking. Markup follows the
// wp-block-table conventions so the page styles itself.
use crate::analyzer::signals::rank_overheated;
use crate::model::{ReportPayload, SectorReport, TrendSignal};
use crate::report::chart::chart_config;

const RANKING_SIZE: usize = 3;

pub fn render_report(payload: &ReportPayload) -> String {
    let mut html = String::new();
    html.push_str(&format!("<p>最終更新: {}</p>", payload.generated_at));
    html.push_str(&render_table(payload));
    html.push_str(&render_chart(payload));
    html.push_str(&render_ranking(payload));
    html.push_str("<p><small>※TOPIX-17業種ETFのデータを元に算出</small></p>");
    html
}

fn render_table(payload: &ReportPayload) -> String {
    let mut html = String::from(r#"<figure class="wp-block-table"><table>"#);
    html.push_str(
        "<thead><tr><th>セクター</th><th>現在値</th><th>前日比</th><th>短期乖離</th>\
         <th>RSI</th><th>過熱感(BB)</th><th>シグナル</th></tr></thead><tbody>",
    );
    for report in payload.sectors.values() {
        html.push_str(&render_row(report));
    }
    html.push_str("</tbody></table></figure>");
    html
}

fn render_row(report: &SectorReport) -> String {
    let s = &report.snapshot;
    // Japanese market convention: red for gains, blue for losses.
    let change_style = if s.change_pct > 0.0 {
        r#" style="color: red;""#
    } else {
        r#" style="color: blue;""#
    };
    let pct_b = if s.pct_b > 1.0 {
        format!(r#"<strong style="color: red;">{:.2}</strong>"#, s.pct_b)
    } else if s.pct_b < 0.0 {
        format!(r#"<strong style="color: blue;">{:.2}</strong>"#, s.pct_b)
    } else {
        format!("{:.2}", s.pct_b)
    };
    format!(
        "<tr><td>{}</td><td>{:.1}</td><td{}>{:.2}%</td><td>{:.2}%</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>",
        report.name, s.close, change_style, s.change_pct, s.diff_short, s.rsi, pct_b,
        signal_badge(s.signal),
    )
}

fn signal_badge(signal: TrendSignal) -> &'static str {
    match signal {
        TrendSignal::Overheated => {
            r#"<span style="color: #fff; background: #d63638; padding: 1px 6px; border-radius: 3px;">過熱</span>"#
        }
        TrendSignal::Undervalued => {
            r#"<span style="color: #fff; background: #2271b1; padding: 1px 6px; border-radius: 3px;">売られすぎ</span>"#
        }
        TrendSignal::Neutral => r#"<span style="color: #50575e;">中立</span>"#,
    }
}

fn render_chart(payload: &ReportPayload) -> String {
    format!(
        "<div style=\"height: 360px;\"><canvas id=\"sector-pulse-chart\"></canvas></div>\
         <script src=\"https://cdn.jsdelivr.net/npm/chart.js@4\"></script>\
         <script>new Chart(document.getElementById('sector-pulse-chart'), {});</script>",
        chart_config(payload)
    )
}

/// Omitted entirely when no sector qualifies.
fn render_ranking(payload: &ReportPayload) -> String {
    let ranked = rank_overheated(payload, RANKING_SIZE);
    if ranked.is_empty() {
        return String::new();
    }
    let mut html = String::from("<h3>過熱・上昇中 TOP3</h3><ol>");
    for (_, report) in &ranked {
        html.push_str(&format!(
            "<li>{} — RSI {:.1} / 前日比 +{:.2}%</li>",
            report.name, report.snapshot.rsi, report.snapshot.change_pct
        ));
    }
    html.push_str("</ol>");
    html
}
