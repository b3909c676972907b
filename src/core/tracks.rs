// Fixed, ordered track list offered on the start overlay.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: &'static str,
    pub locator: &'static str,
}

pub const TRACKS: [Track; 4] = [
    Track {
        name: "Snowflakes Falling Down",
        locator: "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/no_curator/Simon_Panrucker/Happy_Christmas_You_Guys/Simon_Panrucker_-_01_-_Snowflakes_Falling_Down.mp3",
    },
    Track {
        name: "Jingle Bell Swing",
        locator: "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/ccCommunity/Mark_Smeby/En_attendant_Nol/Mark_Smeby_-_07_-_Jingle_Bell_Swing.mp3",
    },
    Track {
        name: "This Christmas",
        locator: "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/no_curator/Dott/This_Christmas/Dott_-_01_-_This_Christmas.mp3",
    },
    Track {
        name: "No room at the inn",
        locator: "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/ccCommunity/TRG_Banks/TRG_Banks_Christmas_Album/TRG_Banks_-_12_-_No_room_at_the_inn.mp3",
    },
];

#[inline]
pub fn track_count() -> usize {
    TRACKS.len()
}

/// Look up a track by its position in the list.
#[inline]
pub fn track(index: usize) -> Option<&'static Track> {
    TRACKS.get(index)
}

