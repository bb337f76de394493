const PAGE_STYLE: &str = "body{margin:0;background:#101418;color:#e8e8e8;font-family:'Segoe UI',sans-serif}\
main.overlay{display:flex;flex-direction:column;align-items:center;justify-content:center;height:100vh}\
.rate{font-size:20vmin;font-weight:700;line-height:1}\
.status{margin-top:2vmin;font-size:3vmin;letter-spacing:.2em;text-transform:uppercase}\
.status.live{color:#6a737d}.status.offline{color:#c0392b}";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    pub title: String,
    pub body: String,
    pub favicon: String,
    pub document: String,
}

pub fn render_overlay(win_rate: f64, disconnected: bool) -> RenderedOverlay {
    let title = render_title(win_rate, disconnected);
    let body = render_content(win_rate, disconnected);
    let favicon = render_favicon(win_rate, disconnected);
    let document = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"2\">\n<title>{title}</title>\n\
         <link rel=\"icon\" href=\"{favicon}\">\n<style>{PAGE_STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    );
    RenderedOverlay {
        title,
        body,
        favicon,
        document,
    }
}

pub fn render_title(win_rate: f64, disconnected: bool) -> String {
    let label = format!("{} session winrate", rate_label(win_rate));
    if disconnected {
        format!("{label} [offline]")
    } else {
        label
    }
}

pub fn render_content(win_rate: f64, disconnected: bool) -> String {
    let status = if disconnected {
        "<div class=\"status offline\">connection lost</div>"
    } else {
        "<div class=\"status live\">live</div>"
    };
    format!(
        "<main class=\"overlay\">\n  <div class=\"rate\" style=\"color:#{color}\">{rate}</div>\n  {status}\n</main>",
        color = rate_color(win_rate, disconnected),
        rate = rate_label(win_rate),
    )
}

pub fn render_favicon(win_rate: f64, disconnected: bool) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'%3E\
         %3Ccircle cx='8' cy='8' r='7' fill='%23{}'/%3E%3C/svg%3E",
        rate_color(win_rate, disconnected)
    )
}

fn rate_label(win_rate: f64) -> String {
    if win_rate.is_nan() {
        "--%".to_owned()
    } else {
        format!("{:.1}%", win_rate * 100.0)
    }
}

fn rate_color(win_rate: f64, disconnected: bool) -> &'static str {
    if disconnected {
        "666666"
    } else if win_rate.is_nan() {
        "8899aa"
    } else if win_rate >= 0.55 {
        "3cb44b"
    } else if win_rate >= 0.45 {
        "d9a520"
    } else {
        "c0392b"
    }
}
