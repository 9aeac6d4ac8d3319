// Small helpers shared by the screens

/// "7" for the landmark countdown, "1:05" once it passes a minute.
pub fn format_countdown(secs: u64) -> String {
    let m = secs / 60;
    let s = secs % 60;
    if m > 0 {
        format!("{}:{:02}", m, s)
    } else {
        format!("{}", s)
    }
}

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg; // console only exists in the browser
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(9), "9");
        assert_eq!(format_countdown(0), "0");
        assert_eq!(format_countdown(65), "1:05");
    }
}
