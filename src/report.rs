use std::{
    fmt::Display,
    io::{self, Write},
};

use pad::PadStr;

use crate::{scan::ResultSet, target::Host};

struct Wording {
    reachable: &'static str,
    unreachable: &'static str,
    summary: &'static str,
    nothing_found: &'static str,
}

const PORTS: Wording = Wording {
    reachable: "OPEN",
    unreachable: "closed",
    summary: "Open ports",
    nothing_found: "No open ports found.",
};

const HOSTS: Wording = Wording {
    reachable: "UP",
    unreachable: "down",
    summary: "Live hosts",
    nothing_found: "No live hosts found.",
};

fn write_table<T, W>(out: &mut W, results: &ResultSet<T>, wording: &Wording) -> io::Result<()>
where
    T: Display,
    W: Write,
{
    let labels: Vec<String> = results.iter().map(|r| format!("{}:", r.target)).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0) + 1;

    for (label, result) in labels.iter().zip(results) {
        let state = if result.reachable {
            wording.reachable
        } else {
            wording.unreachable
        };
        writeln!(out, "{}{}", label.pad_to_width(width), state)?;
    }

    writeln!(out, "\nSummary:")?;
    let found: Vec<String> = results.reachable().map(ToString::to_string).collect();
    if found.is_empty() {
        writeln!(out, "{}", wording.nothing_found)?;
    } else {
        writeln!(out, "{}: {}", wording.summary, found.join(", "))?;
    }
    writeln!(
        out,
        "Scan Duration: {:.4}s",
        results.elapsed().as_secs_f32()
    )
}

pub fn write_ports<W: Write>(out: &mut W, results: &ResultSet<u16>) -> io::Result<()> {
    write_table(out, results, &PORTS)
}

pub fn write_hosts<W: Write>(out: &mut W, results: &ResultSet<Host>) -> io::Result<()> {
    write_table(out, results, &HOSTS)
}
