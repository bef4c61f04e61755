//! Word lists for generated credentials.

pub(crate) const ADJECTIVES: &[&str] = &[
    "able", "amber", "ancient", "autumn", "azure", "bold", "brave", "breezy", "bright", "brisk",
    "calm", "careful", "cheerful", "clever", "cosmic", "crisp", "curious", "daring", "dawn",
    "deep", "eager", "early", "earnest", "fancy", "fearless", "fierce", "fluffy", "frosty",
    "gentle", "gleaming", "golden", "graceful", "grand", "happy", "hardy", "hidden", "honest",
    "humble", "icy", "jolly", "keen", "kind", "lively", "lucky", "lunar", "mellow", "merry",
    "misty", "modest", "noble", "nimble", "odd", "patient", "plucky", "polished", "proud",
    "quick", "quiet", "rapid", "rare", "restless", "rosy", "royal", "rustic", "shiny", "silent",
    "silver", "sleek", "smooth", "snowy", "solar", "spry", "steady", "stormy", "sturdy", "sunny",
    "swift", "tidy", "tranquil", "vast", "velvet", "vivid", "warm", "wild", "wise", "witty",
    "young", "zesty",
];

pub(crate) const NOUNS: &[&str] = &[
    "acorn", "anchor", "aspen", "badger", "beacon", "birch", "bison", "breeze", "brook", "canyon",
    "cedar", "comet", "coral", "cricket", "crystal", "dolphin", "eagle", "ember", "falcon",
    "fern", "finch", "forest", "fox", "garden", "glacier", "harbor", "hawk", "heron", "hill",
    "island", "jaguar", "kestrel", "koala", "lake", "lantern", "leopard", "lily", "lynx", "maple",
    "meadow", "meteor", "moose", "moth", "nebula", "oak", "ocean", "orchid", "otter", "owl",
    "panda", "pebble", "pepper", "pine", "planet", "pond", "prairie", "quartz", "rabbit", "raven",
    "reef", "river", "robin", "sage", "salmon", "sparrow", "spruce", "star", "stone", "summit",
    "swan", "thistle", "thunder", "tiger", "tulip", "valley", "violet", "walrus", "willow",
    "wolf", "wren", "yak", "zebra",
];
