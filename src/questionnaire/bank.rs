// Fixed question banks, one per age bracket

use super::AgeGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 3],
}

/// Free-text prompt that follows the multiple-choice questions.
pub const PROBLEM_PROMPT: &str =
    "Lastly, in your own words, what is the main challenge you are facing right now?";

/// Question bank for `group`, in display order.
pub fn questions(group: AgeGroup) -> &'static [Question] {
    match group {
        AgeGroup::Teen => &TEEN,
        AgeGroup::YoungAdult => &YOUNG_ADULT,
        AgeGroup::Adult => &ADULT,
    }
}

static TEEN: [Question; 10] = [
    Question {
        text: "When you think about school or exams, how does your body feel?",
        options: [
            "Calm and ready",
            "A little tense",
            "Overwhelmingly stressed",
        ],
    },
    Question {
        text: "How often do you compare your life, body, or achievements to what you see on social media?",
        options: [
            "Rarely, I do my own thing",
            "Sometimes, it gets to me",
            "Often, it makes me feel inadequate",
        ],
    },
    Question {
        text: "If you have free time with no distractions, what's your first instinct?",
        options: [
            "Enjoy the quiet",
            "Feel a bit bored",
            "Immediately look for my phone",
        ],
    },
    Question {
        text: "When you look in the mirror, what is the first thought that usually comes to mind?",
        options: [
            "Acceptance or positivity",
            "I focus on my flaws",
            "I try to avoid looking",
        ],
    },
    Question {
        text: "How easy is it for you to say 'no' to friends when they ask you to do something you're not comfortable with?",
        options: [
            "Easy, I state my boundaries",
            "It's a bit difficult",
            "Very hard, I usually give in",
        ],
    },
    Question {
        text: "Think about the last time you felt really passionate or excited about something. How long ago was that?",
        options: [
            "Recently",
            "A few months ago",
            "I can't remember",
        ],
    },
    Question {
        text: "How do you handle disagreements with your parents or guardians?",
        options: [
            "We talk it through",
            "We argue a lot",
            "I just keep quiet to avoid conflict",
        ],
    },
    Question {
        text: "Do you have at least one person you feel you can talk to about absolutely anything without being judged?",
        options: [
            "Yes, definitely",
            "I think so",
            "No, not really",
        ],
    },
    Question {
        text: "How much pressure do you feel about planning your future career or studies?",
        options: [
            "A healthy amount",
            "It's often on my mind",
            "It's a source of constant anxiety",
        ],
    },
    Question {
        text: "How would you describe your sleep on a typical weeknight?",
        options: [
            "Deep and restful",
            "It's okay, but I'm often tired",
            "Restless or I stay up very late",
        ],
    },
];

static YOUNG_ADULT: [Question; 10] = [
    Question {
        text: "How often do you feel like you're 'behind' in life compared to your peers?",
        options: [
            "Almost never",
            "Sometimes",
            "Constantly",
        ],
    },
    Question {
        text: "When you think about your finances, what's the primary emotion?",
        options: [
            "In control",
            "Slightly worried",
            "A lot of stress and anxiety",
        ],
    },
    Question {
        text: "How would you describe your social life after finishing school/college?",
        options: [
            "Fulfilling and active",
            "It's okay, but harder to maintain",
            "I often feel lonely or isolated",
        ],
    },
    Question {
        text: "What role does your job or career play in your sense of identity?",
        options: [
            "It's just one part of me",
            "It's very important to who I am",
            "I feel lost or defined by my job",
        ],
    },
    Question {
        text: "How do you feel when a romantic relationship ends or doesn't work out?",
        options: [
            "I learn from it and move on",
            "It takes me a long time to recover",
            "It feels like a personal failure",
        ],
    },
    Question {
        text: "How often do you feel completely exhausted or 'burnt out' by the end of the week?",
        options: [
            "Rarely",
            "Fairly often",
            "Almost every week",
        ],
    },
    Question {
        text: "Do you feel a clear sense of purpose or direction in your life right now?",
        options: [
            "Yes, I know my path",
            "I have some ideas, but I'm unsure",
            "No, I feel completely lost",
        ],
    },
    Question {
        text: "How do you react to being alone on a weekend evening?",
        options: [
            "I enjoy the personal time",
            "I feel a bit of FOMO (fear of missing out)",
            "I feel sad or anxious",
        ],
    },
    Question {
        text: "How much time do you spend on activities that are purely for your own joy and have no 'productive' goal?",
        options: [
            "A good amount of time",
            "Very little",
            "Almost none",
        ],
    },
    Question {
        text: "How do you handle making big life decisions (e.g., moving, job changes)?",
        options: [
            "With careful planning",
            "With a lot of second-guessing",
            "I tend to avoid making them",
        ],
    },
];

static ADULT: [Question; 10] = [
    Question {
        text: "How would you describe the balance between your work responsibilities and your personal life?",
        options: [
            "Well-balanced",
            "It's a constant juggle",
            "My work completely takes over",
        ],
    },
    Question {
        text: "In your primary relationship (if any), how often do you feel truly heard and understood?",
        options: [
            "Most of the time",
            "Sometimes",
            "Rarely or I'm not in one",
        ],
    },
    Question {
        text: "When you think about your physical health, what's your general feeling?",
        options: [
            "Vibrant and energetic",
            "I have some concerns",
            "I often feel tired or have aches",
        ],
    },
    Question {
        text: "How often do you feel 'stuck' in your current life routine?",
        options: [
            "Almost never, I embrace change",
            "Occasionally, but it passes",
            "Very often, I feel trapped",
        ],
    },
    Question {
        text: "What is your relationship with financial pressures like loans, bills, or supporting a family?",
        options: [
            "It's manageable",
            "It's a significant source of stress",
            "It's overwhelming",
        ],
    },
    Question {
        text: "How much 'you' time do you get in a typical week that is completely free of obligations to others?",
        options: [
            "A few hours, consistently",
            "Maybe an hour if I'm lucky",
            "Practically none",
        ],
    },
    Question {
        text: "When you look at your life goals, how do you feel about your progress?",
        options: [
            "Content with my journey",
            "I feel I should have achieved more",
            "Disappointed or regretful",
        ],
    },
    Question {
        text: "How do you cope with major life stressors, like a sick family member or a job loss?",
        options: [
            "I seek support and tackle it",
            "I struggle but get through",
            "I feel like shutting down",
        ],
    },
    Question {
        text: "How has your circle of close, supportive friends changed in the last five years?",
        options: [
            "It's strong and consistent",
            "It has shrunk significantly",
            "I find it hard to maintain friendships",
        ],
    },
    Question {
        text: "Do you feel like your life has a deeper meaning beyond your daily tasks and responsibilities?",
        options: [
            "Yes, I feel connected to a purpose",
            "I'm searching for it",
            "No, it feels like a grind",
        ],
    },
];
