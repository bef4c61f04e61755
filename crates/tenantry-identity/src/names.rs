//! Building blocks for generated addresses.

pub(crate) const FIRST_NAMES: &[&str] = &[
    "aaron", "abigail", "adam", "alice", "amanda", "amy", "andrew", "angela", "anna", "anthony",
    "ashley", "barbara", "benjamin", "betty", "brandon", "brian", "carol", "charles", "chris",
    "cynthia", "daniel", "david", "deborah", "donna", "edward", "elizabeth", "emily", "eric",
    "frank", "gary", "george", "grace", "hannah", "helen", "jacob", "james", "jason", "jennifer",
    "jessica", "john", "joseph", "joshua", "karen", "kevin", "kimberly", "laura", "linda", "lisa",
    "mark", "mary", "matthew", "melissa", "michael", "michelle", "nancy", "nicole", "patricia",
    "paul", "rachel", "rebecca", "richard", "robert", "ronald", "ryan", "sandra", "sarah", "scott",
    "sharon", "stephanie", "steven", "susan", "thomas", "timothy", "william",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "adams", "allen", "anderson", "baker", "brown", "campbell", "carter", "clark", "collins",
    "davis", "edwards", "evans", "garcia", "gonzalez", "green", "hall", "harris", "hernandez",
    "hill", "jackson", "johnson", "jones", "king", "lee", "lewis", "lopez", "martin", "martinez",
    "miller", "mitchell", "moore", "morris", "nelson", "parker", "perez", "phillips", "roberts",
    "robinson", "rodriguez", "sanchez", "scott", "smith", "taylor", "thomas", "thompson", "turner",
    "walker", "white", "williams", "wilson", "wright", "young",
];

/// Reserved for documentation and testing (RFC 2606).
pub(crate) const DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "mail.example.com",
    "corp.example.org",
];
