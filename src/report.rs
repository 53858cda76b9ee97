use std::io::{self, Write};

use crate::analysis::Upset;

/// Render one upset as its report block, blank separator line included.
pub fn render_upset(upset: &Upset) -> String {
    let m = &upset.matchup;
    format!(
        "Qualification #{}\n\
         [B] {} {}   {} - {}   {} {} [R]\n\
         Blue average ranking: {:?}\n\
         Red average ranking: {:?}\n\
         Average difference: {:?}\n\
         \n",
        m.matchnum,
        m.blue[0],
        m.blue[1],
        m.blue_score,
        m.red_score,
        m.red[0],
        m.red[1],
        upset.blue_avg,
        upset.red_avg,
        upset.avg_diff,
    )
}

/// Write every upset in order, flushing after each so that output already
/// written survives a later failure.
pub fn write_report<W: Write>(out: &mut W, upsets: &[Upset]) -> io::Result<()> {
    for upset in upsets {
        out.write_all(render_upset(upset).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

pub fn print_report(upsets: &[Upset]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, upsets)
}
