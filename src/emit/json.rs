use std::io::Write;

use crate::error::{EmitError, Result};

use super::{EmitRecord, Emitter};

/// Writes one JSON object per record, newline separated.
#[derive(Debug)]
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::Io`] if the flush fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush().map_err(EmitError::from)?;
        Ok(self.writer)
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn emit(&mut self, record: &EmitRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(EmitError::from)?;
        self.writer.write_all(b"\n").map_err(EmitError::from)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point;
    use crate::stack::LengthUnit;

    #[test]
    fn writes_json_lines() {
        let record = EmitRecord {
            component: "shield".into(),
            name: "Finger1".into(),
            material: "aluminium".into(),
            unit: LengthUnit::Micrometre,
            zmin: 0.0,
            zmax: 1.0,
            vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
        };
        let mut emitter = JsonEmitter::new(Vec::new());
        emitter.emit(&record).unwrap();
        emitter.emit(&record).unwrap();
        let out = String::from_utf8(emitter.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["name"], "Finger1");
        assert_eq!(value["vertices"].as_array().unwrap().len(), 3);
    }
}
