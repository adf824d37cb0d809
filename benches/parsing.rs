//! Benchmarks for IRC message parsing and line framing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slirc_remote::{IrcMessage, LineAssembler};

/// Simple PING message
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Message with prefix
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #media :>play";

/// Numeric response
const NUMERIC_RESPONSE: &str = ":irc.server.net 376 remote :End of /MOTD command.";

/// Long trailing payload
const LONG_TRAILING: &str = ":nick!user@host PRIVMSG #media :This is a longer chat message with plenty of text, a colon: and some more words after it";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    group.bench_function("simple_ping", |b| {
        b.iter(|| {
            let msg = IrcMessage::parse(black_box(SIMPLE_MESSAGE)).unwrap();
            black_box(msg)
        })
    });

    group.bench_function("with_prefix", |b| {
        b.iter(|| {
            let msg = IrcMessage::parse(black_box(PREFIX_MESSAGE)).unwrap();
            black_box(msg)
        })
    });

    group.bench_function("numeric_response", |b| {
        b.iter(|| {
            let msg = IrcMessage::parse(black_box(NUMERIC_RESPONSE)).unwrap();
            black_box(msg)
        })
    });

    group.bench_function("long_trailing", |b| {
        b.iter(|| {
            let msg = IrcMessage::parse(black_box(LONG_TRAILING)).unwrap();
            black_box(msg)
        })
    });

    group.finish();
}

fn benchmark_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Line Framing");

    let stream: Vec<u8> = PREFIX_MESSAGE
        .bytes()
        .chain(b"\r\n".iter().copied())
        .cycle()
        .take(64 * (PREFIX_MESSAGE.len() + 2))
        .collect();

    group.bench_function("chunked_feed", |b| {
        b.iter(|| {
            let mut assembler = LineAssembler::new(512);
            let mut lines = 0;
            for chunk in stream.chunks(256) {
                lines += assembler
                    .feed(black_box(chunk))
                    .filter(|item| item.is_ok())
                    .count();
            }
            lines
        })
    });

    group.bench_function("whole_feed", |b| {
        b.iter(|| {
            let mut assembler = LineAssembler::new(512);
            assembler
                .feed(black_box(&stream))
                .filter(|item| item.is_ok())
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_framing);
criterion_main!(benches);
