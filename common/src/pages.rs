use std::fmt::Write as _;

use crate::{
    bands::BAND_TABLE,
    dwell::format_dwell,
    routes::{PATH_GARDEN_TEMPS, PATH_USER_TOGGLE_OFF, PATH_USER_TOGGLE_ON},
    types::MonitorSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    pub fn status_line(self) -> &'static str {
        match self {
            Self::Ok => "HTTP/1.0 200 OK",
            Self::NotFound => "HTTP/1.0 404 Not Found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = format!(
            "{}\r\nContent-type: text/html\r\n\r\n",
            self.status.status_line()
        );
        out.push_str(&self.body);
        out.into_bytes()
    }
}

const TABLE_STYLE: &str = r#"<style type="text/css">
.tg  {border-collapse:collapse;border-spacing:0;}
.tg td{border-color:black;border-style:solid;border-width:1px;font-family:Arial, sans-serif;font-size:14px;overflow:hidden;padding:10px 5px;word-break:normal;}
.tg th{border-color:black;border-style:solid;border-width:1px;font-family:Arial, sans-serif;font-size:14px;font-weight:normal;overflow:hidden;padding:10px 5px;word-break:normal;}
.tg .tg-0lax{text-align:left;vertical-align:top}
</style>"#;

pub fn index_page(snapshot: &MonitorSnapshot) -> Response {
    let mut body = String::from("<!DOCTYPE html><html>");
    body.push_str("<head><title>Garden Monitor</title></head><body>");
    let _ = write!(
        body,
        "<h1>Garden Monitor</h1><p>Current temperature: {:.1} degrees F (Min:{:.1} Max:{:.1})</p>",
        snapshot.latest_temp_f, snapshot.min_temp_f, snapshot.max_temp_f
    );
    body.push_str("<h2>Control User Led:</h2>");
    let _ = write!(
        body,
        "<form action=\"{PATH_USER_TOGGLE_ON}\" method=\"post\"><input type=\"submit\" name=\"toggle_led\" value=\"On\" /></form>"
    );
    let _ = write!(
        body,
        "<form action=\"{PATH_USER_TOGGLE_OFF}\" method=\"post\"><input type=\"submit\" name=\"toggle_led\" value=\"Off\" /></form>"
    );
    let _ = write!(
        body,
        "<a href=\"{PATH_GARDEN_TEMPS}\">See Historical Temperature</a>"
    );
    body.push_str("</body></html>");

    Response {
        status: Status::Ok,
        body,
    }
}

pub fn garden_temps_page(snapshot: &MonitorSnapshot) -> Response {
    let mut body = String::from("<!DOCTYPE html><html>");
    body.push_str("<head><title>Garden Monitor</title></head><body>");
    body.push_str(TABLE_STYLE);
    body.push_str("<table class=\"tg\"><thead><tr>");
    body.push_str("<th class=\"tg-0lax\">Threshold</th>");
    body.push_str("<th class=\"tg-0lax\">Range</th>");
    body.push_str("<th class=\"tg-0lax\">Time in Range</th>");
    body.push_str("</tr></thead><tbody>");
    for (band, seconds) in BAND_TABLE.iter().zip(snapshot.band_seconds) {
        let _ = write!(
            body,
            "<tr><td class=\"tg-0lax\">{}</td><td class=\"tg-0lax\">{}</td><td class=\"tg-0lax\">{}</td></tr>",
            band.description,
            band.range_caption,
            format_dwell(seconds)
        );
    }
    body.push_str("</tbody></table></body></html>");

    Response {
        status: Status::Ok,
        body,
    }
}

pub fn not_found_page() -> Response {
    Response {
        status: Status::NotFound,
        body: "<!DOCTYPE html><html><head><title>Garden Monitor</title></head>\
               <body><h1>Bad Path</h1><p>you shouldn't be here</p></body></html>"
            .to_string(),
    }
}
