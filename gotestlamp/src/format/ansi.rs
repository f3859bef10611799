use crate::format::colors::use_color;

fn sgr(open: &str, close: &str, text: &str) -> String {
    if !use_color() {
        return text.to_string();
    }
    format!("\u{1b}[{open}m{text}\u{1b}[{close}m")
}

pub fn bold(text: &str) -> String {
    sgr("1", "22", text)
}

pub fn red(text: &str) -> String {
    sgr("31", "39", text)
}

pub fn green(text: &str) -> String {
    sgr("32", "39", text)
}

pub fn yellow(text: &str) -> String {
    sgr("33", "39", text)
}

pub fn cyan(text: &str) -> String {
    sgr("36", "39", text)
}

pub fn bright_green(text: &str) -> String {
    sgr("92", "39", text)
}

pub fn bright_yellow(text: &str) -> String {
    sgr("93", "39", text)
}

pub fn white(text: &str) -> String {
    sgr("97", "39", text)
}

pub fn bg_red(text: &str) -> String {
    sgr("41", "49", text)
}

pub fn bg_green(text: &str) -> String {
    sgr("42", "49", text)
}

pub fn bg_yellow(text: &str) -> String {
    sgr("43", "49", text)
}

pub fn bg_bright_green(text: &str) -> String {
    sgr("102", "49", text)
}
