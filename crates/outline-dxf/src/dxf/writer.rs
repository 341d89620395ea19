//! ASCII DXF group-code writer.

/// Appends DXF code/value pairs to an in-memory document.
///
/// Each pair is two lines: the group code, then the value. Reals are always
/// written with six decimals.
#[derive(Debug, Default)]
pub struct DxfWriter {
    out: String,
}

impl DxfWriter {
    /// Creates an empty writer.
    pub const fn new() -> Self {
        Self { out: String::new() }
    }

    /// Write a code/value pair with a string value.
    pub fn write_string(&mut self, code: i16, value: &str) {
        self.write_code(code);
        self.out.push_str(value);
        self.out.push('\n');
    }

    /// Write a code/value pair with an integer value.
    pub fn write_i16(&mut self, code: i16, value: i16) {
        self.write_code(code);
        self.out.push_str(&value.to_string());
        self.out.push('\n');
    }

    /// Write a code/value pair with a real value.
    pub fn write_double(&mut self, code: i16, value: f64) {
        self.write_code(code);
        self.out.push_str(&format!("{value:.6}\n"));
    }

    /// Write an `x`/`y` pair on `x_code` and `x_code + 10`, and a zero Z on
    /// `x_code + 20`.
    pub fn write_point2d(&mut self, x_code: i16, x: f64, y: f64) {
        self.write_double(x_code, x);
        self.write_double(x_code + 10, y);
        self.write_string(x_code + 20, "0.0");
    }

    /// Write section start.
    pub fn write_section_start(&mut self, section_name: &str) {
        self.write_string(0, "SECTION");
        self.write_string(2, section_name);
    }

    /// Write section end.
    pub fn write_section_end(&mut self) {
        self.write_string(0, "ENDSEC");
    }

    /// Write end of file.
    pub fn write_eof(&mut self) {
        self.write_string(0, "EOF");
    }

    /// Consumes the writer and returns the document text.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_code(&mut self, code: i16) {
        self.out.push_str(&code.to_string());
        self.out.push('\n');
    }
}
