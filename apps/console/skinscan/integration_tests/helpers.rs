use skinscan::console_page::{Screen, SharedInput};

use std::io::{BufRead, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Screen output kept in memory for assertions.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn screen(&self) -> Arc<Screen> {
        Screen::new(Box::new(self.clone()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn scripted_input(text: &str) -> SharedInput {
    let reader: Box<dyn BufRead + Send> = Box::new(Cursor::new(text.as_bytes().to_vec()));
    Arc::new(Mutex::new(reader))
}
