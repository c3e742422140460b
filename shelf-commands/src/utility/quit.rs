use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "quit",
    desc: "Unmount the table and exit.",
    category: "utility",
    usage: "quit",
};
