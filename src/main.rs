use nu_plugin::{serve_plugin, MsgPackSerializer};
use nu_plugin_songrec::SongrecPlugin;

fn main() {
    serve_plugin(&SongrecPlugin, MsgPackSerializer {})
}
