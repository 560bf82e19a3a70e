//! Frame decoding and one-line rendering

use std::io::Write;

use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;

use fws_protocol::{Cell, FrameCodec, Request};
use fws_utils::Result;

/// Outcome of an inspection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub frames: usize,
    pub errors: usize,
}

/// Print every length-prefixed frame from `input`
///
/// Stops at the first error. A malformed frame has already been consumed
/// by the codec, but `FramedRead` ends the stream after any decoder
/// error. Oversized length prefixes and IO failures leave no frame
/// boundary to resume from.
pub async fn inspect_stream<R, W>(input: R, codec: FrameCodec, out: &mut W) -> Result<Summary>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut frames = FramedRead::new(input, codec);
    let mut summary = Summary::default();

    while let Some(item) = frames.next().await {
        match item {
            Ok(request) => {
                summary.frames += 1;
                writeln!(out, "{}", describe(&request))?;
            }
            Err(e) => {
                summary.errors += 1;
                tracing::warn!("Stopping after frame {}: {}", summary.frames, e);
                writeln!(out, "error: {}", e)?;
                break;
            }
        }
    }

    tracing::debug!("Inspected {} frames", summary.frames);
    Ok(summary)
}

/// Print a single bare frame
pub fn inspect_raw<W: Write>(frame: &[u8], out: &mut W) -> Result<Summary> {
    match Request::decode(frame) {
        Ok(request) => {
            writeln!(out, "{}", describe(&request))?;
            Ok(Summary {
                frames: 1,
                errors: 0,
            })
        }
        Err(e) => {
            writeln!(out, "error: {}", e)?;
            Ok(Summary {
                frames: 0,
                errors: 1,
            })
        }
    }
}

/// One-line human-readable rendering of a request
pub fn describe(request: &Request) -> String {
    let kind = request.kind();
    match request {
        Request::NewWindow {
            pid,
            x,
            y,
            width,
            height,
        } => format!("{} pid={} at ({}, {}) size {}x{}", kind, pid, x, y, width, height),
        Request::Get { id, x, y } => format!("{} id={} ({}, {})", kind, id, x, y),
        Request::ReplyGet { cell } => format!("{} {}", kind, describe_cell(cell)),
        Request::Event { id, event } => format!(
            "{} id={} type={} mod={:#04x} key={} ch={:#x} size={}x{} mouse=({}, {}) n={}",
            kind,
            id,
            event.event_type,
            event.modifier.bits(),
            event.key.0,
            event.ch,
            event.width,
            event.height,
            event.mouse_x,
            event.mouse_y,
            event.n
        ),
        Request::Draw { id, x, y, cell } => {
            format!("{} id={} ({}, {}) {}", kind, id, x, y, describe_cell(cell))
        }
        Request::DrawFill { id, grid } => format!(
            "{} id={} {}x{} ({} cells)",
            kind,
            id,
            grid.width(),
            grid.height(),
            grid.len()
        ),
        Request::Resize { id, width, height } => {
            format!("{} id={} size {}x{}", kind, id, width, height)
        }
        Request::Move { id, x, y } => format!("{} id={} to ({}, {})", kind, id, x, y),
        Request::ReplyCreation { id }
        | Request::Render { id }
        | Request::Delete { id }
        | Request::Focus { id }
        | Request::Unfocus { id }
        | Request::Ack { id }
        | Request::Repeat { id } => format!("{} id={}", kind, id),
    }
}

fn describe_cell(cell: &Cell) -> String {
    format!(
        "{:?} fg={} bg={} attr={:#06x}",
        cell.ch,
        cell.fg,
        cell.bg,
        cell.attr.bits()
    )
}
