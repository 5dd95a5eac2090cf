//! crates/hadith_core/src/catalog.rs
//!
//! Static catalog data that the content API does not provide: book
//! descriptions, the narrator label, and the bundled biographies.

use crate::domain::{BookSummary, HadithBook, HadithFigure};

pub const MISSING_DESCRIPTION: &str = "Deskripsi untuk kitab ini belum tersedia.";

const BOOK_DESCRIPTIONS: &[(&str, &str)] = &[
    ("bukhari", "Kitab hadits paling shahih yang disusun oleh Imam Al-Bukhari, berisi hadits-hadits pilihan yang diseleksi dari ratusan ribu hadits."),
    ("muslim", "Kitab hadits shahih kedua setelah Shahih Bukhari, terkenal dengan sistematika penyusunan yang sangat baik dan ketat dalam seleksi sanad."),
    ("tirmidzi", "Dikenal juga sebagai Jami' at-Tirmidzi, kitab ini tidak hanya memuat hadits tetapi juga pendapat para ulama fiqih mengenai hadits tersebut."),
    ("nasai", "Sunan An-Nasa'i atau Al-Mujtaba, dikenal karena memiliki syarat perawi yang paling ketat di antara kitab-kitab Sunan lainnya."),
    ("abu-daud", "Kitab Sunan yang fokus pada hadits-hadits hukum (fiqih), menjadi salah satu rujukan utama dalam istinbath hukum Islam."),
    ("ibnu-majah", "Salah satu dari Kutubus Sittah yang memuat hadits-hadits yang tidak terdapat dalam lima kitab lainnya, meskipun juga memuat hadits dha'if."),
    ("ahmad", "Musnad Ahmad, salah satu kitab hadits terbesar yang disusun berdasarkan nama sahabat yang meriwayatkan hadits."),
    ("darimi", "Sunan ad-Darimi, sebuah kitab hadits yang juga dikenal dengan nama Musnad ad-Darimi."),
    ("malik", "Al-Muwatta, karya Imam Malik yang merupakan salah satu kitab hadits tertua dan menggabungkan hadits dengan fiqih."),
];

pub const HADITH_FIGURES: &[HadithFigure] = &[
    HadithFigure {
        slug: "imam-bukhari",
        name: "Imam Al-Bukhari",
        title: "Amirul Mukminin fil Hadits",
        birth_death: "194 H - 256 H",
        bio: "Nama lengkapnya Abu Abdillah Muhammad bin Ismail al-Bukhari. Lahir di Bukhara, Uzbekistan. Ia adalah seorang ahli hadits yang paling terkemuka, dikenal karena kecerdasan, kekuatan hafalan, dan ketelitiannya yang luar biasa dalam menyeleksi hadits. Kitabnya, Shahih al-Bukhari, dianggap sebagai kitab paling otentik setelah Al-Qur'an.",
        works: &["Shahih al-Bukhari", "Al-Adab al-Mufrad", "At-Tarikh al-Kabir", "At-Tarikh as-Saghir"],
    },
    HadithFigure {
        slug: "imam-muslim",
        name: "Imam Muslim",
        title: "Ahli Hadits",
        birth_death: "204 H - 261 H",
        bio: "Nama lengkapnya Abul Husain Muslim bin al-Hajjaj al-Qusyairi an-Naisaburi. Lahir di Naisabur, Iran. Ia adalah murid dari Imam al-Bukhari dan merupakan salah satu ahli hadits terbesar. Kitab Shahih Muslim karyanya menempati posisi kedua sebagai kitab hadits paling shahih.",
        works: &["Shahih Muslim", "Al-Kuna wal Asma", "At-Tamyiz"],
    },
    HadithFigure {
        slug: "imam-syafii",
        name: "Imam Asy-Syafi'i",
        title: "Pendiri Mazhab Syafi'i & Perintis Ushul Fiqih",
        birth_death: "150 H - 204 H",
        bio: "Nama lengkapnya Abu Abdillah Muhammad bin Idris asy-Syafi'i. Lahir di Gaza, Palestina, dan merupakan keturunan Quraisy. Ia adalah seorang ahli fiqih, ushul fiqih, dan hadits yang luar biasa. Ia adalah murid dari Imam Malik, sehingga ia menggabungkan pemahaman ahlu hadits (Madinah) dan ahlu ra'yi (Iraq). Karyanya 'Ar-Risalah' adalah kitab pertama yang membakukan ilmu Ushul Fiqih, meletakkan dasar metodologi untuk memahami sumber-sumber hukum Islam. Mazhab Syafi'i yang didirikannya menjadi salah satu mazhab fiqih terbesar di dunia.",
        works: &["Ar-Risalah", "Al-Umm", "Musnad asy-Syafi'i"],
    },
    HadithFigure {
        slug: "imam-abu-daud",
        name: "Imam Abu Daud",
        title: "Penyusun Hadits-hadits Hukum",
        birth_death: "202 H - 275 H",
        bio: "Nama lengkapnya Abu Daud Sulaiman bin al-Asy'ats as-Sijistani. Beliau adalah seorang ahli hadits terkemuka yang menyusun \"Sunan Abu Daud\". Kitabnya sangat dihormati karena fokus utamanya adalah mengumpulkan hadits-hadits yang menjadi landasan hukum fiqih (istinbath al-ahkam). Dikatakan bahwa seorang ahli fiqih cukup merujuk pada Al-Qur'an dan kitab Sunan Abu Daud ini.",
        works: &["Sunan Abu Daud", "Kitab al-Marasil", "Kitab al-Qadr"],
    },
    HadithFigure {
        slug: "imam-tirmidzi",
        name: "Imam At-Tirmidzi",
        title: "Ahli Hadits dan Fiqih",
        birth_death: "209 H - 279 H",
        bio: "Nama lengkapnya Abu Isa Muhammad bin Isa at-Tirmidzi. Dikenal karena karyanya Sunan at-Tirmidzi (Jami' at-Tirmidzi) yang tidak hanya memuat hadits, tetapi juga klasifikasi status hadits (shahih, hasan, dhaif) dan pandangan para fuqaha (ahli fiqih).",
        works: &["Jami' at-Tirmidzi", "Asy-Syama'il al-Muhammadiyyah"],
    },
    HadithFigure {
        slug: "imam-nasai",
        name: "Imam An-Nasa'i",
        title: "Ahli Hadits dengan Syarat Perawi Paling Ketat",
        birth_death: "215 H - 303 H",
        bio: "Nama lengkapnya Abu Abdurrahman Ahmad bin Syu'aib an-Nasa'i. Lahir di Nasa, Turkmenistan. Beliau dikenal karena kitabnya \"As-Sunan al-Kubra\" yang kemudian diringkas menjadi \"Al-Mujtaba\" atau \"Sunan an-Nasa'i\". Kitabnya dianggap memiliki syarat perawi yang paling ketat di antara kitab-kitab Sunan lainnya, bahkan lebih ketat dari Imam Muslim dalam beberapa aspek.",
        works: &["Sunan an-Nasa'i (Al-Mujtaba)", "As-Sunan al-Kubra", "Fadha'il ash-Shahabah"],
    },
    HadithFigure {
        slug: "imam-ibnu-majah",
        name: "Imam Ibnu Majah",
        title: "Ahli Hadits dan Mufassir",
        birth_death: "209 H - 273 H",
        bio: "Nama lengkapnya Abu Abdillah Muhammad bin Yazid al-Qazwini. Karyanya \"Sunan Ibnu Majah\" melengkapi koleksi Kutubus Sittah (enam kitab hadits utama). Meskipun kitabnya juga memuat beberapa hadits yang dinilai dha'if (lemah) oleh ulama lain, ia memiliki keistimewaan dalam sistematika bab dan memuat hadits-hadits yang tidak ditemukan di lima kitab lainnya.",
        works: &["Sunan Ibnu Majah", "Tafsir al-Qur'an", "Tarikh Qazwin"],
    },
    HadithFigure {
        slug: "imam-ahmad",
        name: "Imam Ahmad bin Hanbal",
        title: "Imam Ahlus Sunnah wal Jama'ah",
        birth_death: "164 H - 241 H",
        bio: "Nama lengkapnya Abu Abdillah Ahmad bin Muhammad bin Hanbal asy-Syaibani. Salah satu dari empat imam mazhab fiqih dan seorang ahli hadits yang gigih. Karyanya yang monumental, \"Musnad Ahmad\", adalah salah satu kitab hadits terbesar yang berisi lebih dari 27,000 hadits. Ia dikenal karena keteguhannya dalam mempertahankan aqidah Ahlus Sunnah dalam peristiwa \"Mihnah\" (ujian keyakinan Al-Qur'an sebagai makhluk).",
        works: &["Musnad Ahmad", "Kitab as-Sunnah", "Kitab al-Wara'", "Kitab az-Zuhd"],
    },
    HadithFigure {
        slug: "imam-malik",
        name: "Imam Malik bin Anas",
        title: "Imam Dar al-Hijrah (Imam Kota Madinah)",
        birth_death: "93 H - 179 H",
        bio: "Pendiri Mazhab Maliki, salah satu dari empat mazhab fiqih Sunni. Lahir dan wafat di Madinah, sehingga dijuluki Imam Dar al-Hijrah (Imam Kota Hijrah). Karyanya, 'Al-Muwatta', adalah salah satu kitab hadits paling awal dan sangat berpengaruh, menjadi rujukan bagi para ulama setelahnya, termasuk menjadi guru bagi Imam Asy-Syafi'i. Kitab ini unik karena menggabungkan hadits Nabi dengan perkataan sahabat, tabi'in, dan ijtihad fiqih. Imam Asy-Syafi'i pernah berkata, 'Tidak ada kitab di muka bumi setelah Kitabullah yang lebih shahih daripada Al-Muwatta' karya Malik.'",
        works: &["Al-Muwatta'", "Al-Mudawwana al-Kubra (diriwayatkan oleh muridnya)"],
    },
    HadithFigure {
        slug: "abu-hurairah",
        name: "Abu Hurairah",
        title: "Sahabat Nabi & Perawi Hadits Terbanyak",
        birth_death: "Wafat 57 H",
        bio: "Nama aslinya adalah Abdurrahman bin Shakhr ad-Dausi, dikenal dengan kunyah Abu Hurairah (Bapak Kucing Kecil) karena kecintaannya pada kucing. Ia adalah sahabat Nabi yang paling banyak meriwayatkan hadits, dengan lebih dari 5,000 riwayat. Meskipun hanya bersama Nabi selama sekitar 4 tahun, ia mendedikasikan seluruh waktunya untuk menyertai Rasulullah SAW dan menghafal sabda-sada beliau. Rasulullah pernah mendoakannya agar memiliki ingatan yang kuat. Setelah wafatnya Nabi, ia menjadi seorang guru dan rujukan utama bagi para tabi'in dalam ilmu hadits.",
        works: &["Meriwayatkan lebih dari 5,300 hadits"],
    },
    HadithFigure {
        slug: "abdullah-bin-umar",
        name: "Abdullah bin Umar",
        title: "Sahabat Nabi & Ahli Fiqih",
        birth_death: "Wafat 73 H",
        bio: "Putra dari Khalifah kedua, Umar bin Khattab. Ia masuk Islam sejak kecil bersama ayahnya. Abdullah bin Umar dikenal karena ketakwaannya yang luar biasa dan semangatnya yang tinggi dalam mengikuti sunnah (ittiba') Nabi Muhammad SAW secara harfiah. Ia sangat berhati-hati dalam meriwayatkan hadits dan mengeluarkan fatwa, membuatnya menjadi salah satu rujukan utama dalam fiqih di kalangan sahabat.",
        works: &["Meriwayatkan sekitar 2,630 hadits"],
    },
    HadithFigure {
        slug: "aisyah-bint-abi-bakar",
        name: "Aisyah bint Abi Bakar",
        title: "Ummul Mu'minin & Perawi Hadits Wanita Terkemuka",
        birth_death: "Wafat 58 H",
        bio: "Salah satu istri Nabi Muhammad SAW dan putri dari sahabat Abu Bakar Ash-Shiddiq. Beliau adalah seorang wanita yang sangat cerdas, memiliki pemahaman mendalam tentang Al-Qur'an, hadits, dan fiqih. Aisyah meriwayatkan lebih dari 2,000 hadits, banyak di antaranya berkaitan dengan kehidupan pribadi Nabi dan hukum-hukum kewanitaan. Ia menjadi rujukan utama para sahabat setelah wafatnya Rasulullah.",
        works: &["Meriwayatkan sekitar 2,210 hadits"],
    },
];

pub fn book_description(slug: &str) -> &'static str {
    BOOK_DESCRIPTIONS
        .iter()
        .find(|(id, _)| *id == slug)
        .map(|(_, description)| *description)
        .unwrap_or(MISSING_DESCRIPTION)
}

/// Enriches an API book listing with the narrator label and description.
pub fn book_from_summary(summary: BookSummary) -> HadithBook {
    let narrator = format!(
        "Imam {}",
        summary.name.strip_prefix("HR. ").unwrap_or(&summary.name)
    );
    HadithBook {
        description: book_description(&summary.id).to_string(),
        slug: summary.id,
        name: summary.name,
        narrator,
        total_hadiths: summary.available,
    }
}

pub fn find_figure(slug: &str) -> Option<&'static HadithFigure> {
    HADITH_FIGURES.iter().find(|figure| figure.slug == slug)
}

/// Resolves an AI suggestion's book display name (e.g. `HR. Bukhari`) to a loaded book.
pub fn find_book_by_name<'a>(books: &'a [HadithBook], name: &str) -> Option<&'a HadithBook> {
    books.iter().find(|book| book.name == name)
}
