use std::fmt::Write as _;

use html_escape::encode_text;

use crate::language::{DisplayMode, LanguageRecord};

const NO_DATA_TEXT: &str = "暫無語言數據";

/// Popup fragment for a region.
///
/// Bars are sorted by percentage (highest first) and Mandarin is dropped in
/// [`DisplayMode::ExcludeMandarin`]. Bar width is capped at 100% but the label
/// shows the stored value with at least one decimal place.
pub fn popup_html(
    display_name: &str,
    record: Option<&LanguageRecord>,
    note: Option<&str>,
    mode: DisplayMode,
) -> String {
    let name = encode_text(display_name);
    let Some(record) = record else {
        return format!("<h4>{name}</h4>{NO_DATA_TEXT}");
    };

    let mut html = String::with_capacity(1024);
    let _ = write!(
        html,
        "<div style=\"min-width: 300px\">\
         <h4 style=\"text-align: center\">{name}語言使用比例</h4>\
         <div style=\"padding: 10px;\">"
    );

    for (language, percentage) in record.sorted_desc() {
        if !mode.includes(language) {
            continue;
        }
        let color = language.color_hex();
        let width = percentage.clamp(0.0, 100.0);
        let _ = write!(
            html,
            "<div style=\"margin: 10px 0;\">\
             <div style=\"display: flex; justify-content: space-between; margin-bottom: 2px;\">\
             <span style=\"font-weight: bold; color: {color}\">{label}</span>\
             <span>{percentage:?}%</span>\
             </div>\
             <div style=\"background-color: #f0f0f0; border-radius: 4px; height: 20px; overflow: hidden;\">\
             <div style=\"width: {width}%; height: 100%; background-color: {color};\"></div>\
             </div>\
             </div>",
            label = language.label(),
        );
    }

    if let Some(note) = note {
        let _ = write!(
            html,
            "<hr style=\"margin: 15px 0; border: none; border-top: 1px solid #ddd;\">\
             <div style=\"background-color: #f8f9fa; padding: 8px; border-radius: 4px; font-size: 12px;\">\
             <span style=\"font-weight: bold; color: #6c757d;\">📝 備註：</span>\
             <span style=\"color: #495057;\">{}</span>\
             </div>",
            encode_text(note)
        );
    }

    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::popup_html;
    use crate::language::{DisplayMode, LanguageRecord};

    fn record() -> LanguageRecord {
        LanguageRecord::new(92.8, 45.0, 105.2, 1.3)
    }

    #[test]
    fn missing_record_renders_no_data_message() {
        assert_eq!(
            popup_html("釣魚臺", None, None, DisplayMode::IncludeMandarin),
            "<h4>釣魚臺</h4>暫無語言數據"
        );
    }

    #[test]
    fn bars_are_sorted_highest_first() {
        let html = popup_html("苗栗縣", Some(&record()), None, DisplayMode::IncludeMandarin);
        let hakka = html.find("客家話").unwrap();
        let mandarin = html.find("華語").unwrap();
        let hokkien = html.find("閩南語").unwrap();
        let indigenous = html.find("原住民語").unwrap();
        assert!(hakka < mandarin && mandarin < hokkien && hokkien < indigenous);
        assert!(html.contains("苗栗縣語言使用比例"));
    }

    #[test]
    fn bar_width_is_clamped_but_label_is_not() {
        let html = popup_html("苗栗縣", Some(&record()), None, DisplayMode::IncludeMandarin);
        assert!(html.contains("<span>105.2%</span>"));
        assert!(html.contains("width: 100%; height: 100%"));
        assert!(!html.contains("width: 105.2%"));
    }

    #[test]
    fn whole_percentages_keep_a_decimal_place() {
        let record = LanguageRecord::new(96.0, 45.0, 0.0, 1.3);
        let html = popup_html("臺中市", Some(&record), None, DisplayMode::IncludeMandarin);
        assert!(html.contains("<span>96.0%</span>"));
        assert!(html.contains("<span>45.0%</span>"));
        assert!(html.contains("<span>0.0%</span>"));
        assert!(html.contains("<span>1.3%</span>"));
    }

    #[test]
    fn exclude_mode_drops_mandarin() {
        let html = popup_html("苗栗縣", Some(&record()), None, DisplayMode::ExcludeMandarin);
        assert!(!html.contains(">華語<"));
        assert!(html.contains(">閩南語<"));
    }

    #[test]
    fn note_is_appended_and_escaped() {
        let html = popup_html(
            "苗栗縣",
            Some(&record()),
            Some("<b>客家</b> & 其他"),
            DisplayMode::IncludeMandarin,
        );
        assert!(html.contains("備註"));
        assert!(html.contains("&lt;b&gt;客家&lt;/b&gt; &amp; 其他"));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn display_name_is_escaped() {
        let html = popup_html("<script>", None, None, DisplayMode::IncludeMandarin);
        assert_eq!(html, "<h4>&lt;script&gt;</h4>暫無語言數據");
    }
}
