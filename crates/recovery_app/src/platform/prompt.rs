use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Asks for a directory; blank input or end of input keeps `default`.
pub(crate) fn prompt_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &Path,
) -> io::Result<PathBuf> {
    write!(output, "{label} [{}]: ", default.display())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(answer)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn blank_answer_keeps_default() {
        let mut input = Cursor::new("  \n");
        let mut output = Vec::new();
        let path = prompt_path(&mut input, &mut output, "Site root", Path::new("public")).unwrap();
        assert_eq!(path, PathBuf::from("public"));
        assert_eq!(String::from_utf8(output).unwrap(), "Site root [public]: ");
    }

    #[test]
    fn answer_is_trimmed() {
        let mut input = Cursor::new(" /backup/site \n");
        let mut output = Vec::new();
        let path = prompt_path(&mut input, &mut output, "Site root", Path::new("public")).unwrap();
        assert_eq!(path, PathBuf::from("/backup/site"));
    }

    #[test]
    fn end_of_input_keeps_default() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let path = prompt_path(&mut input, &mut output, "Blog source", Path::new("source")).unwrap();
        assert_eq!(path, PathBuf::from("source"));
    }
}
